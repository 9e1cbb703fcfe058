//! USB Subsystem
//!
//! CDC ACM virtual serial port carrying the PWM console.

pub mod cdc;
