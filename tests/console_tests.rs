//! Console Input Tests
//!
//! Tests for line assembly and argument fetching.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test console_tests

use pwm_console::config::CONSOLE_LINE_LEN;
use pwm_console::console::{Args, LineBuffer};
use pwm_console::error::ArgError;

fn feed_all(buffer: &mut LineBuffer, bytes: &[u8]) -> Vec<Option<String>> {
    bytes
        .iter()
        .map(|&byte| buffer.feed(byte).map(|line| line.as_str().to_owned()))
        .collect()
}

// =============================================================================
// Line Buffer Tests
// =============================================================================

#[test]
fn test_line_completes_on_cr() {
    let mut buffer = LineBuffer::new();
    let results = feed_all(&mut buffer, b"pwm 1 50\r");
    assert!(results[..8].iter().all(Option::is_none));
    assert_eq!(results[8].as_deref(), Some("pwm 1 50"));
    assert!(buffer.pending().is_empty());
}

#[test]
fn test_line_completes_on_lf() {
    let mut buffer = LineBuffer::new();
    feed_all(&mut buffer, b"help");
    assert_eq!(buffer.feed(b'\n').as_deref(), Some("help"));
}

#[test]
fn test_crlf_yields_empty_second_line() {
    let mut buffer = LineBuffer::new();
    let results = feed_all(&mut buffer, b"pwminit\r\n");
    assert_eq!(results[7].as_deref(), Some("pwminit"));
    assert_eq!(results[8].as_deref(), Some(""));
}

#[test]
fn test_backspace_removes_last_byte() {
    let mut buffer = LineBuffer::new();
    feed_all(&mut buffer, b"pwx\x08m");
    assert_eq!(buffer.pending(), b"pwm");
}

#[test]
fn test_delete_removes_last_byte() {
    let mut buffer = LineBuffer::new();
    feed_all(&mut buffer, b"helpp\x7f");
    assert_eq!(buffer.feed(b'\r').as_deref(), Some("help"));
}

#[test]
fn test_backspace_on_empty_line() {
    let mut buffer = LineBuffer::new();
    assert!(buffer.feed(0x08).is_none());
    assert!(buffer.pending().is_empty());
}

#[test]
fn test_line_at_capacity_kept() {
    let mut buffer = LineBuffer::new();
    let line = "a".repeat(CONSOLE_LINE_LEN);
    feed_all(&mut buffer, line.as_bytes());
    assert!(!buffer.overflowed());
    assert_eq!(buffer.feed(b'\r').as_deref(), Some(line.as_str()));
}

#[test]
fn test_overlong_line_dropped() {
    let mut buffer = LineBuffer::new();
    let line = "a".repeat(CONSOLE_LINE_LEN + 1);
    feed_all(&mut buffer, line.as_bytes());
    assert!(buffer.overflowed());
    assert!(buffer.feed(b'\r').is_none());

    // Next line is unaffected
    assert!(!buffer.overflowed());
    feed_all(&mut buffer, b"help");
    assert_eq!(buffer.feed(b'\r').as_deref(), Some("help"));
}

#[test]
fn test_non_utf8_line_is_empty() {
    let mut buffer = LineBuffer::new();
    feed_all(&mut buffer, &[0xFF, 0xFE]);
    assert_eq!(buffer.feed(b'\r').as_deref(), Some(""));
}

#[test]
fn test_clear_discards_pending() {
    let mut buffer = LineBuffer::new();
    feed_all(&mut buffer, b"pwm");
    buffer.clear();
    assert_eq!(buffer.feed(b'\r').as_deref(), Some(""));
}

// =============================================================================
// Argument Fetcher Tests
// =============================================================================

#[test]
fn test_fetch_in_order() {
    let mut args = Args::new("2 75");
    assert_eq!(args.fetch_u32(), Ok(2));
    assert_eq!(args.fetch_u32(), Ok(75));
    assert_eq!(args.fetch_u32(), Err(ArgError::Missing));
}

#[test]
fn test_fetch_empty_line() {
    let mut args = Args::new("");
    assert_eq!(args.fetch_u32(), Err(ArgError::Missing));
}

#[test]
fn test_fetch_extra_whitespace() {
    let mut args = Args::new("   3 \t  40  ");
    assert_eq!(args.fetch_u32(), Ok(3));
    assert_eq!(args.fetch_u32(), Ok(40));
    assert_eq!(args.fetch_u32(), Err(ArgError::Missing));
}

#[test]
fn test_fetch_hex() {
    let mut args = Args::new("0x3 0X64");
    assert_eq!(args.fetch_u32(), Ok(3));
    assert_eq!(args.fetch_u32(), Ok(100));
}

#[test]
fn test_fetch_malformed() {
    let mut args = Args::new("one 50");
    assert_eq!(args.fetch_u32(), Err(ArgError::Malformed));
    // The bad token is consumed
    assert_eq!(args.fetch_u32(), Ok(50));
}

#[test]
fn test_fetch_negative_malformed() {
    let mut args = Args::new("-1");
    assert_eq!(args.fetch_u32(), Err(ArgError::Malformed));
}

#[test]
fn test_next_token() {
    let mut args = Args::new("pwm extra");
    assert_eq!(args.next_token(), Some("pwm"));
    assert_eq!(args.next_token(), Some("extra"));
    assert_eq!(args.next_token(), None);
}
