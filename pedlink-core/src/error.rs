//! Error types for pedlink-core

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame payload would be empty
    #[error("Empty payload: at least one non-empty field is required")]
    EmptyPayload,

    /// Payload does not fit the 16-bit length prefix
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumMismatch {
        expected: u8,
        received: u8,
    },

    /// Response body length disagrees with the declared length
    #[error("Truncated response: declared {declared} data bytes, body has {actual} bytes")]
    TruncatedResponse {
        declared: usize,
        actual: usize,
    },
}
