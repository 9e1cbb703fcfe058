//! PWM Console Firmware Library
//!
//! Console commands that drive the three PWM outputs of TIM1 on an
//! STM32F303 board. The commands arrive as text lines over a USB virtual
//! serial port:
//!
//! - `pwminit` configures the timer, the output pins and the channels
//! - `pwm <channel> <duty>` sets one channel's duty cycle in percent
//! - `pwmbreathe <channel> <ceiling>` ramps one channel up and down until
//!   the user button is pressed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CONSOLE LAYER                          │
//! │  USB CDC  │  Line buffer  │  Argument fetcher  │  Registry  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     COMMAND LAYER                           │
//! │  pwminit  │  pwm  │  pwmbreathe (ramp state machine)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   CONTROLLER / HAL                          │
//! │  PwmController  │  PwmPeripheral (TIM1, GPIO, delay)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The hardware sits behind the [`hal::PwmPeripheral`] trait. On target it
//! is implemented with embassy-stm32; host tests use the recording
//! peripheral in `hal::mock`.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Logging macros (defmt on target, silent on host)
#[macro_use]
pub mod logging;

/// Hardware Abstraction Layer
///
/// Timer, GPIO and PWM configuration types plus the peripheral trait.
pub mod hal;

/// PWM controller owning the peripheral and its configuration
pub mod controller;

/// LED breathe ramp state machine
pub mod breathe;

/// Console line assembly and argument fetching
pub mod console;

/// Console commands, registry and dispatcher
pub mod commands;

/// USB Subsystem
///
/// CDC ACM virtual serial port carrying the console.
pub mod usb;

/// Error types reported on the console
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::commands::{Execution, Shell};
    pub use crate::config::*;
    pub use crate::controller::PwmController;
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
