//! Shared types used across the PWM console firmware
//!
//! Channel identifiers and the invocation mode handed to every console
//! command.

use core::fmt;

use crate::config::NUM_PWM_CHANNELS;
use crate::error::CommandError;

/// One of the three TIM1 PWM outputs
///
/// Only identifiers 1, 2 and 3 exist. Anything else is rejected by
/// [`Channel::try_from`], never mapped onto a default channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Channel 1 (PA8)
    Ch1,
    /// Channel 2 (PA9)
    Ch2,
    /// Channel 3 (PA10)
    Ch3,
}

impl Channel {
    /// All channels in register order
    pub const ALL: [Self; NUM_PWM_CHANNELS] = [Self::Ch1, Self::Ch2, Self::Ch3];

    /// Console number of the channel (1-3)
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Ch1 => 1,
            Self::Ch2 => 2,
            Self::Ch3 => 3,
        }
    }

    /// Zero-based index, used for per-channel arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ch1 => 0,
            Self::Ch2 => 1,
            Self::Ch3 => 2,
        }
    }

    /// Output pin number on port A
    #[must_use]
    pub const fn pin(self) -> u8 {
        match self {
            Self::Ch1 => 8,
            Self::Ch2 => 9,
            Self::Ch3 => 10,
        }
    }
}

impl TryFrom<u32> for Channel {
    type Error = CommandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ch1),
            2 => Ok(Self::Ch2),
            3 => Ok(Self::Ch3),
            other => Err(CommandError::InvalidChannel(other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{}", self.number())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CH{}", self.number());
    }
}

/// Context in which the registry invokes a command handler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InvocationMode {
    /// Typed at the console; the handler does its work
    #[default]
    Interactive,
    /// Registry is collecting one-line help
    ShortHelp,
    /// Registry is collecting detailed help
    LongHelp,
}

impl InvocationMode {
    /// Whether handlers that honour the mode should act
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for InvocationMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Interactive => defmt::write!(f, "interactive"),
            Self::ShortHelp => defmt::write!(f, "short-help"),
            Self::LongHelp => defmt::write!(f, "long-help"),
        }
    }
}
