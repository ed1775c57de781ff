//! Error types for upsrust-core

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol decode errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Status reply did not split into enough fields
    #[error("Malformed status reply: expected at least {expected} fields, got {actual}")]
    MalformedReply {
        expected: usize,
        actual: usize,
    },
}
