//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] upsrust_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] upsrust_transport::Error),
}
