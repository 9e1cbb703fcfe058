//! PWM Controller
//!
//! Owns the PWM peripheral together with the configuration applied by
//! `pwminit`. Commands borrow the controller mutably, so exactly one of
//! them touches the timer at a time.

use crate::config::TIMER_CLOCK_HZ;
use crate::hal::{
    ButtonState, DutyCycle, OutputCompareConfig, Pin, PinConfig, PwmPeripheral, TimerBaseConfig,
};
use crate::types::Channel;

/// Timer and output compare configuration shared by all channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeripheralContext {
    /// Time base configuration
    pub timer: TimerBaseConfig,
    /// Output compare template applied to every channel
    pub output_compare: OutputCompareConfig,
}

impl PeripheralContext {
    /// Configuration applied by `pwminit`
    #[must_use]
    pub const fn pwm_default() -> Self {
        Self {
            timer: TimerBaseConfig::pwm_default(),
            output_compare: OutputCompareConfig::pwm_default(),
        }
    }
}

/// PWM controller
pub struct PwmController<P> {
    peripheral: P,
    context: Option<PeripheralContext>,
}

impl<P: PwmPeripheral> PwmController<P> {
    /// Wrap a peripheral; nothing is configured until [`Self::init`]
    #[must_use]
    pub const fn new(peripheral: P) -> Self {
        Self {
            peripheral,
            context: None,
        }
    }

    /// (Re)configure time base, pins and the three channels
    ///
    /// Leaves every channel configured but stopped. Repeating the call
    /// yields the same configuration.
    pub fn init(&mut self) {
        let context = PeripheralContext::pwm_default();

        self.peripheral.timer_base_init(&context.timer);
        self.peripheral.timer_base_start();

        self.peripheral.gpio_init(&PinConfig::pwm_outputs());
        self.peripheral.gpio_init(&PinConfig::user_button());

        for channel in Channel::ALL {
            self.peripheral
                .configure_channel(&context.output_compare, channel);
        }

        log_debug!(
            "PWM timer configured: {} Hz",
            context.timer.frequency_hz(TIMER_CLOCK_HZ)
        );
        self.context = Some(context);
    }

    /// Configuration applied by the last [`Self::init`]
    #[must_use]
    pub const fn context(&self) -> Option<&PeripheralContext> {
        self.context.as_ref()
    }

    /// Stop the PWM output of every channel
    pub fn stop_all(&mut self) {
        for channel in Channel::ALL {
            self.peripheral.stop(channel);
        }
    }

    /// Write a raw compare value
    pub fn set_compare(&mut self, channel: Channel, value: u32) {
        self.peripheral.set_compare(channel, value);
    }

    /// Write the compare value for a duty cycle in percent
    pub fn set_duty(&mut self, channel: Channel, duty: DutyCycle) {
        self.peripheral.set_compare(channel, duty.compare_value());
    }

    /// Enable a channel's output
    pub fn start(&mut self, channel: Channel) {
        self.peripheral.start(channel);
    }

    /// Disable a channel's output
    pub fn stop(&mut self, channel: Channel) {
        self.peripheral.stop(channel);
    }

    /// Sample the user button
    pub fn button(&mut self) -> ButtonState {
        ButtonState::from_pull_down_level(self.peripheral.gpio_read(Pin::USER_BUTTON))
    }

    /// Busy-wait
    pub fn delay_ms(&mut self, ms: u32) {
        self.peripheral.delay_ms(ms);
    }

    /// Borrow the peripheral
    #[must_use]
    pub const fn peripheral(&self) -> &P {
        &self.peripheral
    }

    /// Mutably borrow the peripheral
    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }

    /// Release the peripheral
    pub fn into_inner(self) -> P {
        self.peripheral
    }
}
