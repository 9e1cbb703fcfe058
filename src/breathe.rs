//! LED Breathe Ramp
//!
//! Triangle-wave duty cycle ramp on one channel: the compare value climbs
//! from 0 to the ceiling and back, one count per step, until the user
//! button is pressed.
//!
//! ```text
//!            counter == ceiling
//!   ┌───────────┐ ─────────────▶ ┌────────────┐
//!   │ Ascending │                │ Descending │
//!   └───────────┘ ◀───────────── └────────────┘
//!         │        counter == 0         │
//!         └──── button ──▶ Cancelled ◀──┘
//! ```
//!
//! [`Breathe::step`] performs one iteration and returns; callers decide how
//! to wait between steps. [`Breathe::run`] is the blocking form.

use crate::config::BREATHE_STEP_MS;
use crate::controller::PwmController;
use crate::hal::{ButtonState, PwmPeripheral};
use crate::types::Channel;

/// Ramp state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BreatheState {
    /// Counter increments after each step
    #[default]
    Ascending,
    /// Counter decrements after each step
    Descending,
    /// Button pressed, channel stopped
    Cancelled,
}

#[cfg(feature = "embedded")]
impl defmt::Format for BreatheState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ascending => defmt::write!(f, "Ascending"),
            Self::Descending => defmt::write!(f, "Descending"),
            Self::Cancelled => defmt::write!(f, "Cancelled"),
        }
    }
}

/// Breathe ramp on one channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breathe {
    channel: Channel,
    ceiling: u32,
    counter: u32,
    state: BreatheState,
}

impl Breathe {
    /// Start a ramp at 0, ascending
    #[must_use]
    pub const fn new(channel: Channel, ceiling: u32) -> Self {
        Self {
            channel,
            ceiling,
            counter: 0,
            state: BreatheState::Ascending,
        }
    }

    /// Channel being ramped
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Ramp ceiling (raw compare value)
    #[must_use]
    pub const fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Compare value the next step will write
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> BreatheState {
        self.state
    }

    /// Whether the ramp has ended
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.state, BreatheState::Cancelled)
    }

    /// One ramp iteration
    ///
    /// Polls the button first. Pressed: stop the channel and cancel.
    /// Otherwise write the counter to the compare register, (re)start the
    /// channel and move the counter one count in the current direction.
    pub fn step<P: PwmPeripheral>(&mut self, pwm: &mut PwmController<P>) -> BreatheState {
        if self.is_cancelled() {
            return self.state;
        }

        if pwm.button() == ButtonState::Pressed {
            pwm.stop(self.channel);
            self.state = BreatheState::Cancelled;
            log_info!("breathe on {} cancelled", self.channel);
            return self.state;
        }

        // Ceiling wins when it equals 0.
        if self.counter == 0 {
            self.state = BreatheState::Ascending;
        }
        if self.counter == self.ceiling {
            self.state = BreatheState::Descending;
        }

        pwm.set_compare(self.channel, self.counter);
        pwm.start(self.channel);

        self.counter = match self.state {
            BreatheState::Ascending => self.counter.saturating_add(1),
            BreatheState::Descending | BreatheState::Cancelled => self.counter.saturating_sub(1),
        };

        self.state
    }

    /// Step with a blocking delay until the button cancels the ramp
    pub fn run<P: PwmPeripheral>(mut self, pwm: &mut PwmController<P>) {
        while self.step(pwm) != BreatheState::Cancelled {
            pwm.delay_ms(BREATHE_STEP_MS);
        }
    }
}
