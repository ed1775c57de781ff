//! HID transport layer for UPS controllers
//!
//! Provides synchronous, blocking communication over USB HID.

pub mod error;
pub mod hid;
pub mod poll;

#[doc(hidden)]
pub mod mock;

pub use error::{Error, Result};
pub use hid::HidTransport;
pub use poll::watch;

use std::fmt;
use std::str::FromStr;

use bytes::BytesMut;

/// USB identity of a HID endpoint
///
/// Formats as zero-padded hex `vvvv:pppp`, e.g. `0665:5161`, and parses the
/// same form back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    /// USB vendor ID
    pub vendor_id: u16,

    /// USB product ID
    pub product_id: u16,
}

impl DeviceIdentity {
    /// Create an identity from a vendor/product pair
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

impl FromStr for DeviceIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (vendor, product) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidIdentity(s.to_string()))?;
        let vendor_id =
            u16::from_str_radix(vendor, 16).map_err(|_| Error::InvalidIdentity(s.to_string()))?;
        let product_id =
            u16::from_str_radix(product, 16).map_err(|_| Error::InvalidIdentity(s.to_string()))?;
        Ok(Self::new(vendor_id, product_id))
    }
}

/// Transport trait for HID device channels
pub trait Transport {
    /// Open the channel (no-op if already open)
    fn open(&mut self) -> Result<()>;

    /// Close the channel (no-op if already closed)
    fn close(&mut self);

    /// Check if open
    fn is_open(&self) -> bool;

    /// Read up to `max_len` bytes from one input report
    ///
    /// Returns an empty buffer when the channel is closed or no report
    /// arrives within the read timeout.
    fn read(&mut self, max_len: usize) -> Result<BytesMut>;

    /// Write one output report
    ///
    /// Returns the number of bytes written, 0 when the channel is closed.
    fn write(&mut self, payload: &[u8]) -> Result<usize>;

    /// Get the targeted identity
    fn identity(&self) -> DeviceIdentity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        let identity = DeviceIdentity::new(0x0665, 0x5161);
        assert_eq!(identity.to_string(), "0665:5161");
    }

    #[test]
    fn test_identity_parse() {
        let identity: DeviceIdentity = "0079:181c".parse().unwrap();
        assert_eq!(identity, DeviceIdentity::new(0x0079, 0x181c));
    }

    #[test]
    fn test_identity_parse_rejects_garbage() {
        assert!("0665".parse::<DeviceIdentity>().is_err());
        assert!("zzzz:5161".parse::<DeviceIdentity>().is_err());
        assert!("0665:516100".parse::<DeviceIdentity>().is_err());
    }

    #[test]
    fn test_identity_roundtrip() {
        let identity = DeviceIdentity::new(0x0665, 0x5161);
        let parsed: DeviceIdentity = identity.to_string().parse().unwrap();
        assert_eq!(identity, parsed);
    }
}
