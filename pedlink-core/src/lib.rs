//! # pedlink-core
//!
//! Core protocol implementation for PIN-entry payment terminals.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding
//! - Response decoding and validation
//! - LRC checksum calculation
//! - Protocol constants

pub mod error;
pub mod frame;
pub mod lrc;

pub use error::{Error, Result};
pub use frame::{decode_response, Frame};

/// Version tag sent at the start of every request frame
pub const VERSION_TAG: [u8; 2] = *b"V2";

/// Delimiter byte between payload fields
pub const FIELD_DELIMITER: u8 = b',';

/// Maximum payload size (bounded by the 16-bit length prefix)
pub const MAX_PAYLOAD_SIZE: usize = 65535;

/// Response header size in bytes (2 reserved + 2 length)
pub const RESPONSE_HEADER_SIZE: usize = 4;

/// Checksum trailer size in bytes
pub const LRC_SIZE: usize = 1;
