//! # upsrust-core
//!
//! Protocol layer for Megatec/Q1-style USB HID UPS controllers.
//!
//! This crate provides the device-independent primitives:
//! - Command tokens and their two-report framing
//! - Status reply assembly and decoding
//! - Shutdown schedule tokens
//! - Protocol constants

pub mod command;
pub mod constants;
pub mod error;
pub mod status;

pub use command::{Command, Delay, Schedule};
pub use error::{Error, Result};
pub use status::StatusReport;

/// Default USB vendor ID of the supported controller
pub const DEFAULT_VENDOR_ID: u16 = constants::DEFAULT_VENDOR_ID;

/// Default USB product ID of the supported controller
pub const DEFAULT_PRODUCT_ID: u16 = constants::DEFAULT_PRODUCT_ID;
