//! Types Module Tests
//!
//! Tests for shared types (Channel, InvocationMode) and error text.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test types_tests

use pwm_console::error::{ArgError, CommandError};
use pwm_console::types::{Channel, InvocationMode};

// =============================================================================
// Channel Tests
// =============================================================================

#[test]
fn test_channel_try_from_valid() {
    assert_eq!(Channel::try_from(1), Ok(Channel::Ch1));
    assert_eq!(Channel::try_from(2), Ok(Channel::Ch2));
    assert_eq!(Channel::try_from(3), Ok(Channel::Ch3));
}

#[test]
fn test_channel_try_from_invalid() {
    assert_eq!(Channel::try_from(0), Err(CommandError::InvalidChannel(0)));
    assert_eq!(Channel::try_from(4), Err(CommandError::InvalidChannel(4)));
    assert_eq!(
        Channel::try_from(u32::MAX),
        Err(CommandError::InvalidChannel(u32::MAX))
    );
}

#[test]
fn test_channel_number_round_trip() {
    for channel in Channel::ALL {
        assert_eq!(Channel::try_from(channel.number()), Ok(channel));
    }
}

#[test]
fn test_channel_index_distinct() {
    let indices: Vec<usize> = Channel::ALL.iter().map(|ch| ch.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_channel_pins() {
    assert_eq!(Channel::Ch1.pin(), 8);
    assert_eq!(Channel::Ch2.pin(), 9);
    assert_eq!(Channel::Ch3.pin(), 10);
}

#[test]
fn test_channel_display() {
    assert_eq!(Channel::Ch2.to_string(), "CH2");
}

// =============================================================================
// Invocation Mode Tests
// =============================================================================

#[test]
fn test_invocation_mode_default_interactive() {
    assert_eq!(InvocationMode::default(), InvocationMode::Interactive);
}

#[test]
fn test_invocation_mode_is_interactive() {
    assert!(InvocationMode::Interactive.is_interactive());
    assert!(!InvocationMode::ShortHelp.is_interactive());
    assert!(!InvocationMode::LongHelp.is_interactive());
}

// =============================================================================
// Error Text Tests
// =============================================================================

#[test]
fn test_command_error_messages() {
    assert_eq!(CommandError::MissingChannel.to_string(), "Missing Channel");
    assert_eq!(
        CommandError::MissingDuty.to_string(),
        "Missing value for duty cycle"
    );
    assert_eq!(CommandError::InvalidChannel(7).to_string(), "No channel found");
}

#[test]
fn test_arg_error_messages() {
    assert_eq!(ArgError::Missing.to_string(), "missing argument");
    assert_eq!(ArgError::Malformed.to_string(), "malformed argument");
}
