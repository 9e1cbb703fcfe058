//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the PWM console board.
//! Timer setup, console sizes and USB identifiers are
//! centralized here.

/// System clock frequency (STM32F303 @ 72MHz from an 8MHz HSE)
pub const SYSTEM_CLOCK_HZ: u32 = 72_000_000;

/// External crystal / ST-LINK MCO frequency
pub const HSE_FREQUENCY_HZ: u32 = 8_000_000;

/// TIM1 kernel clock (APB2 undivided)
pub const TIMER_CLOCK_HZ: u32 = SYSTEM_CLOCK_HZ;

/// TIM1 prescaler register value
pub const TIMER_PRESCALER: u16 = 72;

/// TIM1 auto-reload (period) register value
pub const TIMER_PERIOD: u16 = 1000;

/// TIM1 repetition counter
pub const TIMER_REPETITION: u8 = 0;

/// Compare value loaded into every channel by `pwminit`
pub const INITIAL_PULSE: u32 = 500;

/// Compare value corresponding to 100% in the `pwm` command
pub const DUTY_FULL_SCALE: u32 = 1024;

/// Delay between two breathe ramp steps in milliseconds
pub const BREATHE_STEP_MS: u32 = 2;

/// Number of PWM channels driven by the console
pub const NUM_PWM_CHANNELS: usize = 3;

/// Alternate function number binding PA8..PA10 to TIM1 (AF6)
pub const PWM_ALTERNATE_FUNCTION: u8 = 6;

/// Console line buffer size
pub const CONSOLE_LINE_LEN: usize = 64;

/// Console output buffer size
pub const CONSOLE_OUTPUT_LEN: usize = 256;

/// Console prompt
pub const CONSOLE_PROMPT: &str = "> ";

/// USB VID (use test VID for development)
pub const USB_VID: u16 = 0x1209;

/// USB PID (get from pid.codes for production)
pub const USB_PID: u16 = 0x0001;

/// USB CDC ACM packet size
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// PWM output frequency produced by the configured prescaler and period
#[must_use]
pub const fn pwm_frequency_hz() -> u32 {
    TIMER_CLOCK_HZ / ((TIMER_PRESCALER as u32 + 1) * (TIMER_PERIOD as u32 + 1))
}
