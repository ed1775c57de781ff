//! High-level UPS interface

use std::thread;
use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, info, warn};

use upsrust_core::constants::{DEFAULT_SETTLE_TIME_MS, STATUS_CHUNK_LEN, STATUS_REPLY_CHUNKS};
use upsrust_core::{Command, Schedule, StatusReport};
use upsrust_transport::{HidTransport, Transport};

use crate::error::Result;

/// Megatec/Q1 UPS device
///
/// High-level interface driving one HID channel through the named UPS
/// operations. Every operation opens the channel, writes the command as two
/// output reports, reads back a reply when one is defined, and closes the
/// channel again before returning.
///
/// # Examples
///
/// ```no_run
/// use upsrust::UpsDevice;
///
/// fn main() -> upsrust::Result<()> {
///     let mut ups = UpsDevice::new(0x0665, 0x5161);
///
///     let status = ups.status()?;
///     println!("{}", status.to_json());
///
///     Ok(())
/// }
/// ```
pub struct UpsDevice {
    transport: Box<dyn Transport>,
    settle_time: Duration,
}

impl UpsDevice {
    /// Create a new device over the native HID transport
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self::with_transport(Box::new(HidTransport::new(vendor_id, product_id)))
    }

    /// Create a device over a caller-supplied transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            settle_time: Duration::from_millis(DEFAULT_SETTLE_TIME_MS),
        }
    }

    /// Set the wait between the status query and the first reply read
    ///
    /// Defaults to 100 ms. The controller sends no acknowledgment; it simply
    /// needs this long before its reply reports are ready.
    pub fn with_settle_time(mut self, settle_time: Duration) -> Self {
        self.settle_time = settle_time;
        self
    }

    /// Check if the channel is currently open
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Switch the UPS output back on
    pub fn power_on(&mut self) -> Result<()> {
        info!("Powering on UPS output");
        self.execute(&Command::PowerOn)
    }

    /// Shut the output down immediately
    pub fn shutdown_now(&mut self) -> Result<()> {
        warn!("Shutting down UPS output now");
        self.execute(&Command::ShutdownNow)
    }

    /// Shut the output down after 18 seconds
    pub fn shutdown_after_18s(&mut self) -> Result<()> {
        warn!("Shutting down UPS output in 18 seconds");
        self.execute(&Command::ShutdownAfter18s)
    }

    /// Shut down, then restore the output after one minute
    pub fn restart_after_1min(&mut self) -> Result<()> {
        warn!("Restarting UPS output after one minute");
        self.execute(&Command::RestartAfter1min)
    }

    /// Shut down, then restore the output after 18 seconds
    pub fn restart_after_18s(&mut self) -> Result<()> {
        warn!("Restarting UPS output after 18 seconds");
        self.execute(&Command::RestartAfter18s)
    }

    /// Shut down on a raw schedule token, passed through unmodified
    ///
    /// See [`Schedule`] for the token grammar; the token is not validated
    /// here.
    pub fn shutdown_custom(&mut self, token: &str) -> Result<()> {
        warn!("Scheduling UPS shutdown (token {:?})", token);
        self.execute(&Command::CustomShutdown(token.to_string()))
    }

    /// Shut down on a typed schedule
    pub fn shutdown_scheduled(&mut self, schedule: Schedule) -> Result<()> {
        warn!("Scheduling UPS shutdown ({})", schedule);
        self.execute(&schedule.into())
    }

    /// Start a battery self-test
    pub fn battery_test(&mut self) -> Result<()> {
        info!("Starting battery self-test");
        self.execute(&Command::BatteryTest)
    }

    /// Toggle the alarm beeper
    pub fn toggle_beeper(&mut self) -> Result<()> {
        info!("Toggling beeper");
        self.execute(&Command::ToggleBeeper)
    }

    /// Query the UPS status
    ///
    /// Sends the status query, waits the settle time, then gathers the fixed
    /// number of reply reports and decodes them.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the device cannot be reached, or a
    /// protocol error if the reply does not carry all status fields.
    pub fn status(&mut self) -> Result<StatusReport> {
        debug!("Querying UPS status");

        self.transport.open()?;
        let chunks = self.collect_status_reply();
        self.transport.close();

        let report = StatusReport::from_report_chunks(&chunks?)?;
        debug!("Decoded status: {}", report);

        Ok(report)
    }

    // Helper methods

    /// Run one fire-and-forget command: open, two writes, close
    fn execute(&mut self, command: &Command) -> Result<()> {
        self.transport.open()?;
        let result = self.send_command(command);
        self.transport.close();
        result
    }

    /// Write the two framing tokens of a command
    fn send_command(&mut self, command: &Command) -> Result<()> {
        debug!("Sending {}", command);

        self.transport.write(command.token().as_bytes())?;
        self.transport.write(command.terminator().as_bytes())?;

        Ok(())
    }

    /// Gather the status reply as ordered report chunks
    fn collect_status_reply(&mut self) -> Result<Vec<BytesMut>> {
        self.send_command(&Command::StatusQuery)?;

        thread::sleep(self.settle_time);

        let mut chunks = Vec::with_capacity(STATUS_REPLY_CHUNKS);
        for _ in 0..STATUS_REPLY_CHUNKS {
            chunks.push(self.transport.read(STATUS_CHUNK_LEN)?);
        }

        Ok(chunks)
    }
}
