//! Input-report polling

use std::thread;
use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::{error::Result, Transport};

/// Poll a device until its input report changes
///
/// Each cycle opens the channel, fetches one report of up to `report_len`
/// bytes, and closes the channel again. The first report is the baseline;
/// `on_change` runs for every later report that differs from the previous
/// one. Return `false` from the callback to stop watching.
///
/// Transport failures (device unplugged, enumeration lost) end the watch
/// with the underlying error.
pub fn watch<F>(
    transport: &mut dyn Transport,
    report_len: usize,
    interval: Duration,
    mut on_change: F,
) -> Result<()>
where
    F: FnMut(&[u8]) -> bool,
{
    let mut last = sample(transport, report_len)?;
    trace!("Baseline report: {:02X?}", &last[..]);

    loop {
        if !interval.is_zero() {
            thread::sleep(interval);
        }

        let current = sample(transport, report_len)?;
        if current != last {
            debug!("Report changed: {:02X?}", &current[..current.len().min(16)]);
            let keep_watching = on_change(&current);
            last = current;
            if !keep_watching {
                return Ok(());
            }
        }
    }
}

/// One open-read-close cycle
fn sample(transport: &mut dyn Transport, report_len: usize) -> Result<BytesMut> {
    transport.open()?;
    let report = transport.read(report_len);
    transport.close();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;

    #[test]
    fn test_watch_fires_on_changed_report() {
        let mock = MockTransport::new();
        mock.push_read(&[1, 1, 1]);
        mock.push_read(&[1, 1, 1]);
        mock.push_read(&[2, 2, 2]);

        let mut seen = Vec::new();
        let mut transport = mock.clone();
        watch(&mut transport, 20, Duration::ZERO, |report| {
            seen.push(report.to_vec());
            false
        })
        .unwrap();

        assert_eq!(seen, vec![vec![2, 2, 2]]);
    }

    #[test]
    fn test_watch_sees_empty_report_as_change() {
        let mock = MockTransport::new();
        mock.push_read(&[5]);

        let mut seen = Vec::new();
        let mut transport = mock.clone();
        watch(&mut transport, 20, Duration::ZERO, |report| {
            seen.push(report.to_vec());
            false
        })
        .unwrap();

        assert_eq!(seen, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_watch_closes_channel_between_samples() {
        let mock = MockTransport::new();
        mock.push_read(&[1]);
        mock.push_read(&[2]);

        let mut transport = mock.clone();
        watch(&mut transport, 20, Duration::ZERO, |_| false).unwrap();

        assert!(!mock.is_open());
        assert!(mock.native_opens() >= 2);
    }

    #[test]
    fn test_watch_propagates_open_failure() {
        let mock = MockTransport::new();
        mock.refuse_open();

        let mut transport = mock.clone();
        let result = watch(&mut transport, 20, Duration::ZERO, |_| true);

        assert!(result.is_err());
    }
}
