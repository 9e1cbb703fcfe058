//! Console Input
//!
//! Assembles command lines from the serial byte stream and fetches
//! numeric arguments from them, one at a time.

use heapless::{String, Vec};

use crate::config::CONSOLE_LINE_LEN;
use crate::error::ArgError;

/// ASCII backspace
const BACKSPACE: u8 = 0x08;

/// ASCII delete (sent by most terminals for the backspace key)
const DELETE: u8 = 0x7F;

/// Line assembler
pub struct LineBuffer {
    /// Pending line bytes
    buffer: Vec<u8, CONSOLE_LINE_LEN>,
    /// Set when the current line outgrew the buffer
    overflowed: bool,
}

impl LineBuffer {
    /// Create an empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed a byte to the buffer
    ///
    /// Returns the completed line when `byte` is CR or LF. Empty lines
    /// (including the LF of a CR LF pair) come back as empty strings so the
    /// caller can redraw its prompt. A line longer than the buffer is
    /// dropped as a whole.
    pub fn feed(&mut self, byte: u8) -> Option<String<CONSOLE_LINE_LEN>> {
        match byte {
            b'\r' | b'\n' => {
                let overflowed = self.overflowed;
                let line = core::str::from_utf8(&self.buffer)
                    .ok()
                    .and_then(|line| String::try_from(line).ok());
                self.clear();

                if overflowed {
                    log_warn!("console line too long, dropped");
                    return None;
                }
                if line.is_none() {
                    log_warn!("console line is not UTF-8, dropped");
                }
                Some(line.unwrap_or_default())
            }
            BACKSPACE | DELETE => {
                let _ = self.buffer.pop();
                None
            }
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Bytes collected so far
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Whether the current line overflowed
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Argument fetcher over the remainder of a command line
pub struct Args<'a> {
    tokens: core::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Args<'a> {
    /// Fetch arguments from `line` (command name already removed)
    #[must_use]
    pub fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_ascii_whitespace(),
        }
    }

    /// Next raw token
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Next token as an unsigned 32-bit number
    ///
    /// Decimal, or hexadecimal with a `0x`/`0X` prefix.
    ///
    /// # Errors
    ///
    /// `ArgError::Missing` when the line has no further token,
    /// `ArgError::Malformed` when the token is not a `u32`.
    pub fn fetch_u32(&mut self) -> Result<u32, ArgError> {
        let token = self.tokens.next().ok_or(ArgError::Missing)?;
        parse_u32(token).ok_or(ArgError::Malformed)
    }
}

fn parse_u32(token: &str) -> Option<u32> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}
