//! GPIO Configuration
//!
//! Pin identifiers and pin configuration records for the PWM outputs and
//! the user button.

use heapless::Vec;

use crate::config::PWM_ALTERNATE_FUNCTION;
use crate::types::Channel;

/// GPIO port
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// GPIOA
    A,
    /// GPIOB
    B,
    /// GPIOC
    C,
}

/// A single GPIO pin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pin {
    /// Port of the pin
    pub port: Port,
    /// Pin number within the port (0-15)
    pub number: u8,
}

impl Pin {
    /// User push button (PA0)
    pub const USER_BUTTON: Self = Self::new(Port::A, 0);

    /// Create a pin identifier
    #[must_use]
    pub const fn new(port: Port, number: u8) -> Self {
        Self { port, number }
    }

    /// Output pin of a PWM channel
    #[must_use]
    pub const fn for_channel(channel: Channel) -> Self {
        Self::new(Port::A, channel.pin())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Pin {
    fn format(&self, f: defmt::Formatter) {
        let port = match self.port {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
        };
        defmt::write!(f, "P{}{}", port, self.number);
    }
}

/// Pin function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// Digital input
    Input,
    /// Push-pull output
    OutputPushPull,
    /// Push-pull driven by a peripheral alternate function
    AlternatePushPull,
}

/// Internal pull resistor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Pull {
    /// No pull resistor
    #[default]
    None,
    /// Pull-up
    Up,
    /// Pull-down
    Down,
}

/// Output slew rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Speed {
    /// Low speed
    #[default]
    Low,
    /// Medium speed
    Medium,
    /// High speed
    High,
}

/// Configuration applied to a set of pins on one port
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinConfig {
    /// Port the pins belong to
    pub port: Port,
    /// Pin numbers
    pub pins: Vec<u8, 16>,
    /// Pin function
    pub mode: PinMode,
    /// Pull resistor
    pub pull: Pull,
    /// Slew rate
    pub speed: Speed,
    /// Alternate function number, for [`PinMode::AlternatePushPull`]
    pub alternate: Option<u8>,
}

impl PinConfig {
    /// PA8, PA9, PA10 as TIM1 outputs: AF6 push-pull, no pull, low speed
    #[must_use]
    pub fn pwm_outputs() -> Self {
        let mut pins = Vec::new();
        for channel in Channel::ALL {
            let _ = pins.push(channel.pin());
        }
        Self {
            port: Port::A,
            pins,
            mode: PinMode::AlternatePushPull,
            pull: Pull::None,
            speed: Speed::Low,
            alternate: Some(PWM_ALTERNATE_FUNCTION),
        }
    }

    /// PA0 as the user button: input, pull-down, high speed
    #[must_use]
    pub fn user_button() -> Self {
        let mut pins = Vec::new();
        let _ = pins.push(Pin::USER_BUTTON.number);
        Self {
            port: Pin::USER_BUTTON.port,
            pins,
            mode: PinMode::Input,
            pull: Pull::Down,
            speed: Speed::High,
            alternate: None,
        }
    }

    /// Check whether the configuration covers a pin
    #[must_use]
    pub fn contains(&self, pin: Pin) -> bool {
        self.port == pin.port && self.pins.contains(&pin.number)
    }
}

/// Push button state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Button is released
    Released,
    /// Button is pressed
    Pressed,
}

impl ButtonState {
    /// Decode the level of a pull-down button (idles low)
    #[must_use]
    pub const fn from_pull_down_level(high: bool) -> Self {
        if high {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "Released"),
            Self::Pressed => defmt::write!(f, "Pressed"),
        }
    }
}
