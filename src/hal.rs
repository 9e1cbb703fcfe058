//! Hardware Abstraction Layer
//!
//! Configuration types for the PWM timer, its output pins and the user
//! button, plus the [`PwmPeripheral`] trait every backend implements.
//! Calls at this layer are trusted to succeed.

pub mod gpio;
pub mod pwm;
pub mod timer;

#[cfg(feature = "std")]
pub mod mock;

#[cfg(feature = "embedded")]
pub mod stm32;

use crate::types::Channel;

pub use gpio::{ButtonState, Pin, PinConfig, PinMode, Port, Pull, Speed};
pub use pwm::{
    compare_register, DutyCycle, IdleState, OcMode, OutputCompareConfig, Polarity,
};
pub use timer::{ClockDivision, CounterMode, TimerBaseConfig};

/// PWM timer, GPIO and delay services used by the console commands
pub trait PwmPeripheral {
    /// Enable the timer clock and load the time base registers
    fn timer_base_init(&mut self, config: &TimerBaseConfig);

    /// Start the time base counter
    fn timer_base_start(&mut self);

    /// Configure one output compare channel, leaving its output disabled
    fn configure_channel(&mut self, config: &OutputCompareConfig, channel: Channel);

    /// Write a channel's compare register
    fn set_compare(&mut self, channel: Channel, value: u32);

    /// Enable PWM output on a channel
    fn start(&mut self, channel: Channel);

    /// Disable PWM output on a channel
    fn stop(&mut self, channel: Channel);

    /// Apply a pin configuration
    fn gpio_init(&mut self, config: &PinConfig);

    /// Read the logic level of an input pin (`true` = high)
    fn gpio_read(&mut self, pin: Pin) -> bool;

    /// Busy-wait for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}
