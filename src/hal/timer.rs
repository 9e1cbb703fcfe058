//! Timer Base Configuration
//!
//! Time base settings for the PWM timer: prescaler, counting mode,
//! period, clock division and repetition counter.

use crate::config::{TIMER_PERIOD, TIMER_PRESCALER, TIMER_REPETITION};

/// Counter direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CounterMode {
    /// Count from 0 up to the period
    #[default]
    Up,
    /// Count from the period down to 0
    Down,
    /// Count up then down
    CenterAligned,
}

/// Dead-time / filter clock division
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClockDivision {
    /// tDTS = tCK_INT
    #[default]
    Div1,
    /// tDTS = 2 * tCK_INT
    Div2,
    /// tDTS = 4 * tCK_INT
    Div4,
}

/// Time base register values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerBaseConfig {
    /// Prescaler register (divides by `prescaler + 1`)
    pub prescaler: u16,
    /// Counting mode
    pub counter_mode: CounterMode,
    /// Auto-reload register
    pub period: u16,
    /// Clock division
    pub clock_division: ClockDivision,
    /// Repetition counter
    pub repetition_counter: u8,
}

impl TimerBaseConfig {
    /// Time base used by the PWM console: /73 prescaler, up-counting, period 1000
    #[must_use]
    pub const fn pwm_default() -> Self {
        Self {
            prescaler: TIMER_PRESCALER,
            counter_mode: CounterMode::Up,
            period: TIMER_PERIOD,
            clock_division: ClockDivision::Div1,
            repetition_counter: TIMER_REPETITION,
        }
    }

    /// Counter update frequency for the given timer clock
    #[must_use]
    pub const fn frequency_hz(&self, timer_clock_hz: u32) -> u32 {
        timer_clock_hz / ((self.prescaler as u32 + 1) * (self.period as u32 + 1))
    }
}

impl Default for TimerBaseConfig {
    fn default() -> Self {
        Self::pwm_default()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TimerBaseConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TimerBase(psc={}, arr={}, rep={})",
            self.prescaler,
            self.period,
            self.repetition_counter
        );
    }
}
