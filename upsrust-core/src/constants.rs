//! Protocol constants

/// USB vendor ID of the stock Megatec/Q1 controller board
pub const DEFAULT_VENDOR_ID: u16 = 0x0665;

/// USB product ID of the stock Megatec/Q1 controller board
pub const DEFAULT_PRODUCT_ID: u16 = 0x5161;

/// Input reports collected for one status reply
pub const STATUS_REPLY_CHUNKS: usize = 20;

/// Bytes requested per status reply read
pub const STATUS_CHUNK_LEN: usize = 20;

/// Default wait between the status query and the first read (milliseconds)
pub const DEFAULT_SETTLE_TIME_MS: u64 = 100;

/// Terminator for simple commands (power on, battery test, beeper)
pub const SIMPLE_TERMINATOR: &str = "0\r";

/// Terminator for timed shutdown/restart commands
pub const TIMED_TERMINATOR: &str = "0\r0000000";

/// Terminator for the status query
pub const STATUS_TERMINATOR: &str = "0\r0";

/// Work-mode codes carried in the status reply
pub mod mode {
    /// Mains present, output fed from the line
    pub const LINE: &str = "000";

    /// Output fed from the battery
    pub const BATTERY: &str = "001";
}
