//! Console error types
//!
//! Every error renders as the exact text printed on the console.

use core::fmt;

/// Failure to fetch a numeric argument from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// No token left on the line
    Missing,
    /// Token present but not an unsigned 32-bit number
    Malformed,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing argument"),
            Self::Malformed => f.write_str("malformed argument"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ArgError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Missing => defmt::write!(f, "Missing"),
            Self::Malformed => defmt::write!(f, "Malformed"),
        }
    }
}

/// Command failure, reported on the console and never to the dispatcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// `pwm` without a channel argument
    MissingChannel,
    /// `pwm` without a duty argument
    MissingDuty,
    /// Channel number outside 1..=3
    InvalidChannel(u32),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingChannel => f.write_str("Missing Channel"),
            Self::MissingDuty => f.write_str("Missing value for duty cycle"),
            Self::InvalidChannel(_) => f.write_str("No channel found"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::MissingChannel => defmt::write!(f, "MissingChannel"),
            Self::MissingDuty => defmt::write!(f, "MissingDuty"),
            Self::InvalidChannel(raw) => defmt::write!(f, "InvalidChannel({})", raw),
        }
    }
}
