//! Mock PWM peripheral for host testing
//!
//! Records every hardware call in order and keeps the resulting register
//! state (time base, channel configuration, compare values, enabled
//! outputs, pin configurations) for test verification. The user button
//! can be scripted to read pressed after a number of polls.

use std::vec::Vec;

use super::{
    compare_register, OutputCompareConfig, Pin, PinConfig, PwmPeripheral, TimerBaseConfig,
};
use crate::config::NUM_PWM_CHANNELS;
use crate::types::Channel;

/// One recorded hardware call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HwOp {
    /// `timer_base_init`
    TimerBaseInit(TimerBaseConfig),
    /// `timer_base_start`
    TimerBaseStart,
    /// `configure_channel`
    ConfigureChannel(Channel, OutputCompareConfig),
    /// `set_compare`
    SetCompare(Channel, u32),
    /// `start`
    Start(Channel),
    /// `stop`
    Stop(Channel),
    /// `gpio_init`
    GpioInit(PinConfig),
    /// `gpio_read`
    GpioRead(Pin),
    /// `delay_ms`
    Delay(u32),
}

/// Recording peripheral
#[derive(Debug, Default)]
pub struct MockPeripheral {
    ops: Vec<HwOp>,
    timer_base: Option<TimerBaseConfig>,
    timer_running: bool,
    channel_config: [Option<OutputCompareConfig>; NUM_PWM_CHANNELS],
    compare: [u16; NUM_PWM_CHANNELS],
    enabled: [bool; NUM_PWM_CHANNELS],
    pins: Vec<PinConfig>,
    button_polls: usize,
    press_after: Option<usize>,
    elapsed_ms: u64,
}

impl MockPeripheral {
    /// Create a mock with the button never pressed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Button reads released for `polls` reads, then pressed
    #[must_use]
    pub fn with_button_pressed_after(polls: usize) -> Self {
        Self {
            press_after: Some(polls),
            ..Self::default()
        }
    }

    /// All recorded calls
    #[must_use]
    pub fn ops(&self) -> &[HwOp] {
        &self.ops
    }

    /// Forget recorded calls, keep register state
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Compare values written to one channel, in order
    #[must_use]
    pub fn compare_writes(&self, channel: Channel) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HwOp::SetCompare(ch, value) if *ch == channel => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Number of calls that change hardware state (reads and delays excluded)
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, HwOp::GpioRead(_) | HwOp::Delay(_)))
            .count()
    }

    /// Last time base configuration
    #[must_use]
    pub const fn timer_base(&self) -> Option<TimerBaseConfig> {
        self.timer_base
    }

    /// Whether the time base counter runs
    #[must_use]
    pub const fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Output compare configuration of a channel
    #[must_use]
    pub const fn channel_config(&self, channel: Channel) -> Option<OutputCompareConfig> {
        self.channel_config[channel.index()]
    }

    /// Current compare register of a channel (16 bits wide, like CCRx)
    ///
    /// [`HwOp::SetCompare`] keeps the value as written.
    #[must_use]
    pub const fn compare(&self, channel: Channel) -> u16 {
        self.compare[channel.index()]
    }

    /// Whether a channel's output is enabled
    #[must_use]
    pub const fn is_enabled(&self, channel: Channel) -> bool {
        self.enabled[channel.index()]
    }

    /// Effective configuration of a pin (last `gpio_init` covering it)
    #[must_use]
    pub fn pin_config(&self, pin: Pin) -> Option<&PinConfig> {
        self.pins.iter().rev().find(|config| config.contains(pin))
    }

    /// Total simulated delay
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl PwmPeripheral for MockPeripheral {
    fn timer_base_init(&mut self, config: &TimerBaseConfig) {
        self.ops.push(HwOp::TimerBaseInit(*config));
        self.timer_base = Some(*config);
    }

    fn timer_base_start(&mut self) {
        self.ops.push(HwOp::TimerBaseStart);
        self.timer_running = true;
    }

    fn configure_channel(&mut self, config: &OutputCompareConfig, channel: Channel) {
        self.ops.push(HwOp::ConfigureChannel(channel, *config));
        self.channel_config[channel.index()] = Some(*config);
        self.compare[channel.index()] = compare_register(config.pulse);
        self.enabled[channel.index()] = false;
    }

    fn set_compare(&mut self, channel: Channel, value: u32) {
        self.ops.push(HwOp::SetCompare(channel, value));
        self.compare[channel.index()] = compare_register(value);
    }

    fn start(&mut self, channel: Channel) {
        self.ops.push(HwOp::Start(channel));
        self.enabled[channel.index()] = true;
    }

    fn stop(&mut self, channel: Channel) {
        self.ops.push(HwOp::Stop(channel));
        self.enabled[channel.index()] = false;
    }

    fn gpio_init(&mut self, config: &PinConfig) {
        self.ops.push(HwOp::GpioInit(config.clone()));
        self.pins.retain(|existing| existing != config);
        self.pins.push(config.clone());
    }

    fn gpio_read(&mut self, pin: Pin) -> bool {
        self.ops.push(HwOp::GpioRead(pin));
        if pin != Pin::USER_BUTTON {
            return false;
        }
        let polls = self.button_polls;
        self.button_polls += 1;
        self.press_after.is_some_and(|after| polls >= after)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ops.push(HwOp::Delay(ms));
        self.elapsed_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_presses_after_scripted_polls() {
        let mut hw = MockPeripheral::with_button_pressed_after(2);
        assert!(!hw.gpio_read(Pin::USER_BUTTON));
        assert!(!hw.gpio_read(Pin::USER_BUTTON));
        assert!(hw.gpio_read(Pin::USER_BUTTON));
    }

    #[test]
    fn button_never_pressed_by_default() {
        let mut hw = MockPeripheral::new();
        for _ in 0..100 {
            assert!(!hw.gpio_read(Pin::USER_BUTTON));
        }
    }

    #[test]
    fn compare_register_is_16_bits_wide() {
        let mut hw = MockPeripheral::new();
        hw.set_compare(Channel::Ch1, 65_536);
        assert_eq!(hw.compare(Channel::Ch1), 0);
        assert_eq!(hw.compare_writes(Channel::Ch1), vec![65_536]);
    }

    #[test]
    fn configure_channel_loads_pulse() {
        let mut hw = MockPeripheral::new();
        hw.configure_channel(&OutputCompareConfig::pwm_default(), Channel::Ch2);
        assert_eq!(hw.compare(Channel::Ch2), 500);
        assert!(!hw.is_enabled(Channel::Ch2));
    }
}
