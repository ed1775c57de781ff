//! UPS command definitions
//!
//! Commands follow the Megatec/Q1 serial-over-HID convention: a short ASCII
//! instruction token followed by a terminator token, written to the device as
//! two separate output reports. The split is part of the wire contract; the
//! controller misbehaves if both tokens arrive in one report.

use std::fmt;

use crate::constants::{SIMPLE_TERMINATOR, STATUS_TERMINATOR, TIMED_TERMINATOR};

/// Named UPS operations
///
/// Each variant carries the exact primary token written to the device.
/// `CustomShutdown` passes a caller-built schedule token through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the output back on
    PowerOn,
    /// Shut the output down immediately
    ShutdownNow,
    /// Shut the output down after 18 seconds
    ShutdownAfter18s,
    /// Shut down, then restore the output after one minute
    RestartAfter1min,
    /// Shut down, then restore the output after 18 seconds
    RestartAfter18s,
    /// Caller-supplied shutdown schedule token (see [`Schedule`])
    CustomShutdown(String),
    /// Start a battery self-test
    BatteryTest,
    /// Toggle the alarm beeper
    ToggleBeeper,
    /// Query the status record
    StatusQuery,
}

impl Command {
    /// Primary instruction token
    pub fn token(&self) -> &str {
        match self {
            Self::PowerOn => "0C",
            Self::ShutdownNow => "0S00R0000",
            Self::ShutdownAfter18s => "0S.3R0000",
            Self::RestartAfter1min => "0S01R0001",
            Self::RestartAfter18s => "0S.3R0001",
            Self::CustomShutdown(schedule) => schedule,
            Self::BatteryTest => "0T",
            Self::ToggleBeeper => "0Q",
            Self::StatusQuery => "0QS",
        }
    }

    /// Terminator token written after the primary token
    pub fn terminator(&self) -> &'static str {
        match self {
            Self::PowerOn | Self::BatteryTest | Self::ToggleBeeper => SIMPLE_TERMINATOR,
            Self::StatusQuery => STATUS_TERMINATOR,
            Self::ShutdownNow
            | Self::ShutdownAfter18s
            | Self::RestartAfter1min
            | Self::RestartAfter18s
            | Self::CustomShutdown(_) => TIMED_TERMINATOR,
        }
    }

    /// Check if this command produces a reply to read back
    pub fn expects_reply(&self) -> bool {
        matches!(self, Self::StatusQuery)
    }

    /// Get command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "POWER_ON",
            Self::ShutdownNow => "SHUTDOWN_NOW",
            Self::ShutdownAfter18s => "SHUTDOWN_18S",
            Self::RestartAfter1min => "RESTART_1MIN",
            Self::RestartAfter18s => "RESTART_18S",
            Self::CustomShutdown(_) => "SHUTDOWN_CUSTOM",
            Self::BatteryTest => "BATTERY_TEST",
            Self::ToggleBeeper => "TOGGLE_BEEPER",
            Self::StatusQuery => "STATUS_QUERY",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.name(), self.token())
    }
}

/// Shutdown schedule for [`Command::CustomShutdown`]
///
/// Token grammar: `0S` + delay + `R` + restart flag. The delay is either
/// `.<d>` (tenths of a minute, 6-second steps) or a two-digit minute count;
/// the flag is `0000` for shutdown only, `0001` to restore the output
/// afterwards. Values outside the grammar range are clamped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Schedule {
    delay: Delay,
    restart: bool,
}

/// Delay bucket for a shutdown schedule
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delay {
    /// Tenths of a minute, 1..=9 (6 to 54 seconds)
    Tenths(u8),
    /// Whole minutes, 0..=99
    Minutes(u8),
}

impl Schedule {
    /// Create a schedule
    pub fn new(delay: Delay, restart: bool) -> Self {
        Self { delay, restart }
    }

    /// Build the wire token
    pub fn token(&self) -> String {
        let flag = if self.restart { "0001" } else { "0000" };
        match self.delay {
            Delay::Tenths(tenths) => format!("0S.{}R{}", tenths.clamp(1, 9), flag),
            Delay::Minutes(minutes) => format!("0S{:02}R{}", minutes.min(99), flag),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl From<Schedule> for Command {
    fn from(schedule: Schedule) -> Self {
        Self::CustomShutdown(schedule.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_tokens() {
        assert_eq!(Command::PowerOn.token(), "0C");
        assert_eq!(Command::ShutdownNow.token(), "0S00R0000");
        assert_eq!(Command::ShutdownAfter18s.token(), "0S.3R0000");
        assert_eq!(Command::RestartAfter1min.token(), "0S01R0001");
        assert_eq!(Command::RestartAfter18s.token(), "0S.3R0001");
        assert_eq!(Command::BatteryTest.token(), "0T");
        assert_eq!(Command::ToggleBeeper.token(), "0Q");
        assert_eq!(Command::StatusQuery.token(), "0QS");
    }

    #[test]
    fn test_terminators() {
        assert_eq!(Command::PowerOn.terminator(), "0\r");
        assert_eq!(Command::BatteryTest.terminator(), "0\r");
        assert_eq!(Command::ToggleBeeper.terminator(), "0\r");
        assert_eq!(Command::ShutdownNow.terminator(), "0\r0000000");
        assert_eq!(Command::RestartAfter1min.terminator(), "0\r0000000");
        assert_eq!(Command::RestartAfter18s.terminator(), "0\r0000000");
        assert_eq!(Command::StatusQuery.terminator(), "0\r0");
    }

    #[test]
    fn test_custom_token_passthrough() {
        let cmd = Command::CustomShutdown("0S05R0001".to_string());
        assert_eq!(cmd.token(), "0S05R0001");
        assert_eq!(cmd.terminator(), "0\r0000000");
    }

    #[test]
    fn test_expects_reply() {
        assert!(Command::StatusQuery.expects_reply());
        assert!(!Command::PowerOn.expects_reply());
        assert!(!Command::ShutdownNow.expects_reply());
    }

    #[test]
    fn test_schedule_tokens() {
        assert_eq!(Schedule::new(Delay::Tenths(3), false).token(), "0S.3R0000");
        assert_eq!(Schedule::new(Delay::Minutes(1), true).token(), "0S01R0001");
        assert_eq!(Schedule::new(Delay::Minutes(30), false).token(), "0S30R0000");
    }

    #[test]
    fn test_schedule_clamps_out_of_range() {
        assert_eq!(Schedule::new(Delay::Tenths(12), false).token(), "0S.9R0000");
        assert_eq!(Schedule::new(Delay::Tenths(0), false).token(), "0S.1R0000");
        assert_eq!(Schedule::new(Delay::Minutes(150), true).token(), "0S99R0001");
    }

    #[test]
    fn test_schedule_into_command() {
        let cmd: Command = Schedule::new(Delay::Minutes(2), false).into();
        assert_eq!(cmd.token(), "0S02R0000");
        assert_eq!(cmd.terminator(), "0\r0000000");
    }
}
