//! UPS status reply decoding

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::constants::mode;
use crate::error::{Error, Result};

/// Decoded UPS status record
///
/// # Reply layout
///
/// The controller answers a status query with ASCII text spread across many
/// small input reports. Concatenated and split on whitespace it carries
/// eight positional fields:
///
/// ```text
/// 120 230 229 000 50.0 24.0 00.0 01
///  |   |   |   |   |    |    |   └─ identifier token
///  |   |   |   |   |    |    └─ unused/reserved
///  |   |   |   |   |    └─ battery voltage (V)
///  |   |   |   |   └─ line frequency (Hz)
///  |   |   |   └─ work mode (000 = line, 001 = battery)
///  |   |   └─ output voltage (V)
///  |   └─ input voltage (V)
///  └─ nominal voltage (V)
/// ```
///
/// Voltage and frequency fields keep their unit suffix; the work-mode code
/// is replaced by a readable label when it is one of the two known codes and
/// passed through verbatim otherwise.
///
/// # Examples
///
/// ```
/// use upsrust_core::StatusReport;
///
/// let report: StatusReport = "120 230 229 000 50.0 24.0 00.0 01".parse().unwrap();
/// assert_eq!(report.mode, "Line Mode");
/// assert_eq!(report.input_voltage, "230 V");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Nominal voltage, key `V`
    #[serde(rename = "V")]
    pub nominal_voltage: String,

    /// Input voltage, key `Vin`
    #[serde(rename = "Vin")]
    pub input_voltage: String,

    /// Output voltage, key `Vout`
    #[serde(rename = "Vout")]
    pub output_voltage: String,

    /// Work mode, key `Modo`
    #[serde(rename = "Modo")]
    pub mode: String,

    /// Line frequency, key `Freq`
    #[serde(rename = "Freq")]
    pub frequency: String,

    /// Battery voltage, key `VBatt`
    #[serde(rename = "VBatt")]
    pub battery_voltage: String,

    /// Unused/reserved token, key `--`
    #[serde(rename = "--")]
    pub reserved: String,

    /// Identifier token, key `Id`
    #[serde(rename = "Id")]
    pub identifier: String,
}

impl StatusReport {
    /// Fields expected in a reply
    pub const FIELD_COUNT: usize = 8;

    /// Decode a status reply from raw report chunks
    ///
    /// Concatenates the chunks in order, maps every byte to its code point,
    /// and parses the resulting text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedReply`] if the text holds fewer than
    /// [`Self::FIELD_COUNT`] whitespace-separated fields.
    pub fn from_report_chunks<C: AsRef<[u8]>>(chunks: &[C]) -> Result<Self> {
        let text = assemble_reply_text(chunks);
        debug!("Status reply text: {:?}", text.trim_matches(char::from(0)));
        text.parse()
    }

    /// Render as pretty JSON with the fixed key order
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl FromStr for StatusReport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() < Self::FIELD_COUNT {
            return Err(Error::MalformedReply {
                expected: Self::FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let work_mode = match fields[3] {
            mode::LINE => "Line Mode".to_string(),
            mode::BATTERY => "Battery Mode".to_string(),
            other => other.to_string(),
        };

        Ok(Self {
            nominal_voltage: format!("{} V", fields[0]),
            input_voltage: format!("{} V", fields[1]),
            output_voltage: format!("{} V", fields[2]),
            mode: work_mode,
            frequency: format!("{} Hz", fields[4]),
            battery_voltage: format!("{} V", fields[5]),
            reserved: fields[6].to_string(),
            identifier: fields[7].to_string(),
        })
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status[mode={}, in={}, out={}, batt={}]",
            self.mode, self.input_voltage, self.output_voltage, self.battery_voltage
        )
    }
}

/// Map raw reply bytes to text, one character per byte
///
/// The controller interleaves its ASCII reply across fixed-size reports, so
/// the chunks are concatenated first and every byte becomes the character at
/// its code point (never multi-byte decoding).
pub fn assemble_reply_text<C: AsRef<[u8]>>(chunks: &[C]) -> String {
    chunks
        .iter()
        .flat_map(|chunk| chunk.as_ref().iter())
        .map(|&byte| char::from(byte))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    const HAPPY_REPLY: &str = "120 230 229 000 50.0 24.0 00.0 01";

    /// Split text into device-sized report chunks, padding with empty reads
    fn chunked(text: &str, chunk_len: usize, count: usize) -> Vec<Vec<u8>> {
        let mut chunks: Vec<Vec<u8>> = text
            .as_bytes()
            .chunks(chunk_len)
            .map(|chunk| chunk.to_vec())
            .collect();
        chunks.resize(count, Vec::new());
        chunks
    }

    #[test]
    fn test_decode_happy_path() {
        let chunks = chunked(HAPPY_REPLY, 20, 20);
        let report = StatusReport::from_report_chunks(&chunks).unwrap();

        assert_eq!(report.nominal_voltage, "120 V");
        assert_eq!(report.input_voltage, "230 V");
        assert_eq!(report.output_voltage, "229 V");
        assert_eq!(report.mode, "Line Mode");
        assert_eq!(report.frequency, "50.0 Hz");
        assert_eq!(report.battery_voltage, "24.0 V");
        assert_eq!(report.reserved, "00.0");
        assert_eq!(report.identifier, "01");
    }

    #[test]
    fn test_mode_battery() {
        let report: StatusReport = "120 230 229 001 50.0 24.0 00.0 01".parse().unwrap();
        assert_eq!(report.mode, "Battery Mode");
    }

    #[test]
    fn test_mode_passthrough() {
        let report: StatusReport = "120 230 229 002 50.0 24.0 00.0 01".parse().unwrap();
        assert_eq!(report.mode, "002");
    }

    #[test]
    fn test_malformed_reply() {
        let result = "120 230 229".parse::<StatusReport>();
        assert!(matches!(
            result,
            Err(Error::MalformedReply {
                expected: 8,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        let chunks = chunked("", 20, 20);
        let result = StatusReport::from_report_chunks(&chunks);
        assert!(matches!(
            result,
            Err(Error::MalformedReply { actual: 0, .. })
        ));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let report: StatusReport = "120 230 229 000 50.0 24.0 00.0 01 99 98"
            .parse()
            .unwrap();
        assert_eq!(report.identifier, "01");
    }

    #[test]
    fn test_assemble_maps_bytes_by_code_point() {
        let text = assemble_reply_text(&[[0x31u8, 0xB0], [0x32, 0x20]]);
        assert_eq!(text, "1\u{b0}2 ");
    }

    #[test]
    fn test_json_rendering() {
        let report: StatusReport = HAPPY_REPLY.parse().unwrap();
        let expected = r#"{
  "V": "120 V",
  "Vin": "230 V",
  "Vout": "229 V",
  "Modo": "Line Mode",
  "Freq": "50.0 Hz",
  "VBatt": "24.0 V",
  "--": "00.0",
  "Id": "01"
}"#;
        assert_eq!(report.to_json(), expected);
    }

    #[test]
    fn test_display() {
        let report: StatusReport = HAPPY_REPLY.parse().unwrap();
        assert_eq!(
            report.to_string(),
            "Status[mode=Line Mode, in=230 V, out=229 V, batt=24.0 V]"
        );
    }

    proptest! {
        #[test]
        fn test_short_replies_always_malformed(count in 0usize..8) {
            let text = vec!["42"; count].join(" ");
            prop_assert!(text.parse::<StatusReport>().is_err());
        }

        #[test]
        fn test_eight_or_more_fields_decode(extra in 0usize..4) {
            let mut fields = vec!["120", "230", "229", "000", "50.0", "24.0", "00.0", "01"];
            fields.extend(std::iter::repeat("x").take(extra));
            let report = fields.join(" ").parse::<StatusReport>().unwrap();
            prop_assert_eq!(report.identifier, "01");
        }
    }
}
