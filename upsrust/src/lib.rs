//! # upsrust
//!
//! Rust control library for Megatec/Q1-style USB HID UPS devices.
//!
//! ## Features
//!
//! - Named operations for every documented UPS command
//! - Typed shutdown/restart scheduling
//! - Status decoding with JSON rendering
//! - Swappable transport behind a trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use upsrust::UpsDevice;
//!
//! fn main() -> upsrust::Result<()> {
//!     // Talk to the UPS on its default HID identity
//!     let mut ups = UpsDevice::new(0x0665, 0x5161);
//!
//!     // Query and print the status
//!     let status = ups.status()?;
//!     println!("{}", status.to_json());
//!
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::UpsDevice;
pub use error::{Error, Result};

// Re-export types
pub use upsrust_core::{
    Command, Delay, Schedule, StatusReport, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID,
};
pub use upsrust_transport::{watch, DeviceIdentity, HidTransport, Transport};
