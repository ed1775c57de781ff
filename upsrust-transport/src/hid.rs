//! USB HID transport

use std::time::Duration;

use bytes::BytesMut;
use hidapi::HidApi;
use tracing::{debug, trace, warn};

use crate::{error::*, DeviceIdentity, Transport};

/// HID transport for UPS controllers
///
/// Holds at most one native device handle. The handle is acquired by
/// [`open`](Transport::open) and released by [`close`](Transport::close) or
/// on drop; closed is the default state and read/write degrade to empty
/// results while closed.
pub struct HidTransport {
    identity: DeviceIdentity,
    device: Option<hidapi::HidDevice>,
    read_timeout: Duration,
}

impl HidTransport {
    /// Create new HID transport
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            identity: DeviceIdentity::new(vendor_id, product_id),
            device: None,
            read_timeout: Duration::from_millis(250),
        }
    }

    /// Create from an existing identity
    pub fn from_identity(identity: DeviceIdentity) -> Self {
        Self::new(identity.vendor_id, identity.product_id)
    }

    /// Set how long one read waits for an input report
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

impl Transport for HidTransport {
    fn open(&mut self) -> Result<()> {
        if self.is_open() {
            debug!("Channel to {} already open", self.identity);
            return Ok(());
        }

        let api = HidApi::new()?;

        let info = api
            .device_list()
            .find(|info| {
                info.vendor_id() == self.identity.vendor_id
                    && info.product_id() == self.identity.product_id
            })
            .ok_or(Error::DeviceNotFound(self.identity))?;

        debug!(
            "Opening {} ({})",
            self.identity,
            info.product_string().unwrap_or("unnamed device"),
        );

        let device = info.open_device(&api).map_err(|source| Error::OpenFailed {
            identity: self.identity,
            source,
        })?;

        self.device = Some(device);
        Ok(())
    }

    fn close(&mut self) {
        match self.device.take() {
            Some(_) => debug!("Closed channel to {}", self.identity),
            None => debug!("Channel to {} already closed", self.identity),
        }
    }

    fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn read(&mut self, max_len: usize) -> Result<BytesMut> {
        let Some(device) = self.device.as_ref() else {
            debug!("Read on closed channel to {}", self.identity);
            return Ok(BytesMut::new());
        };

        let mut buf = vec![0u8; max_len];
        let n = device.read_timeout(&mut buf, self.read_timeout.as_millis() as i32)?;

        trace!("Received {} bytes: {:02X?}", n, &buf[..n.min(16)]);

        let mut report = BytesMut::with_capacity(n);
        report.extend_from_slice(&buf[..n]);
        Ok(report)
    }

    fn write(&mut self, payload: &[u8]) -> Result<usize> {
        let Some(device) = self.device.as_ref() else {
            debug!("Write on closed channel to {}", self.identity);
            return Ok(0);
        };

        trace!(
            "Sending {} bytes: {:02X?}",
            payload.len(),
            &payload[..payload.len().min(16)]
        );

        let n = device.write(payload)?;
        Ok(n)
    }

    fn identity(&self) -> DeviceIdentity {
        self.identity
    }
}

impl Drop for HidTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("HID transport dropped while still open");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hid_transport_create() {
        let transport = HidTransport::new(0x0665, 0x5161);
        assert!(!transport.is_open());
        assert_eq!(transport.identity().to_string(), "0665:5161");
    }

    #[test]
    fn test_read_on_closed_channel_is_empty() {
        let mut transport = HidTransport::new(0x0665, 0x5161);
        let report = transport.read(20).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_write_on_closed_channel_is_noop() {
        let mut transport = HidTransport::new(0x0665, 0x5161);
        let written = transport.write(b"0QS").unwrap();
        assert_eq!(written, 0);
    }

    // Note: This test requires the UPS attached
    #[test]
    #[ignore] // Only run with real device
    fn test_open_real_device() {
        let mut transport = HidTransport::new(0x0665, 0x5161);

        transport.open().unwrap();
        assert!(transport.is_open());

        transport.open().unwrap();
        assert!(transport.is_open());

        transport.close();
        assert!(!transport.is_open());

        transport.close();
        assert!(!transport.is_open());
    }
}
