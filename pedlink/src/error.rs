//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] pedlink_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] pedlink_transport::Error),

    #[error("Terminal not connected")]
    NotConnected,
}
