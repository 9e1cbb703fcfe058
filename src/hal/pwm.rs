//! PWM Output Configuration
//!
//! Output compare settings shared by the three TIM1 channels, and the
//! percent-to-compare-value scaling used by the `pwm` command.

use crate::config::{DUTY_FULL_SCALE, INITIAL_PULSE};

/// PWM duty cycle as requested on the console (percent)
///
/// No clamp is applied: values above 100 produce compare values past the
/// timer period and keep the output fully on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DutyCycle(u32);

impl DutyCycle {
    /// Create from percentage
    #[must_use]
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent)
    }

    /// Compare register value: `percent * 1024 / 100`
    ///
    /// Uses 32-bit register arithmetic, so the product wraps like the
    /// hardware-facing computation it replaces.
    #[must_use]
    pub const fn compare_value(self) -> u32 {
        self.0.wrapping_mul(DUTY_FULL_SCALE) / 100
    }
}

/// Value latched by a 16-bit TIM1 capture/compare register
///
/// Bits above 15 are discarded, as a plain register store does.
#[must_use]
pub const fn compare_register(value: u32) -> u16 {
    (value & 0xFFFF) as u16
}

impl Default for DutyCycle {
    fn default() -> Self {
        Self(0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DutyCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", self.0);
    }
}

/// Output compare mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OcMode {
    /// Active while counter < compare
    #[default]
    Pwm1,
    /// Inactive while counter < compare
    Pwm2,
}

/// Output polarity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Active level is high
    ActiveHigh,
    /// Active level is low
    ActiveLow,
}

/// Output level while the main output is disabled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IdleState {
    /// Output low when idle
    #[default]
    Reset,
    /// Output high when idle
    Set,
}

impl IdleState {
    /// OISx / OISNx bit value
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Set)
    }
}

/// Output compare configuration applied to each PWM channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputCompareConfig {
    /// Compare mode
    pub mode: OcMode,
    /// Initial compare value
    pub pulse: u32,
    /// Main output polarity
    pub polarity: Polarity,
    /// Complementary output polarity
    pub complementary_polarity: Polarity,
    /// Fast mode enable
    pub fast_mode: bool,
    /// Main output idle state
    pub idle_state: IdleState,
    /// Complementary output idle state
    pub complementary_idle_state: IdleState,
}

impl OutputCompareConfig {
    /// PWM mode 1, pulse 500, active high, fast mode off, idle low
    #[must_use]
    pub const fn pwm_default() -> Self {
        Self {
            mode: OcMode::Pwm1,
            pulse: INITIAL_PULSE,
            polarity: Polarity::ActiveHigh,
            complementary_polarity: Polarity::ActiveLow,
            fast_mode: false,
            idle_state: IdleState::Reset,
            complementary_idle_state: IdleState::Reset,
        }
    }
}

impl Default for OutputCompareConfig {
    fn default() -> Self {
        Self::pwm_default()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OutputCompareConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "OC(pulse={}, fast={})", self.pulse, self.fast_mode);
    }
}
