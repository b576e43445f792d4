//! Transport layer for the PED protocol
//!
//! Provides blocking TCP communication with terminals.

pub mod error;
pub mod tcp;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use bytes::BytesMut;

/// Transport trait for different communication methods
///
/// Every operation blocks the calling thread until the underlying transport
/// completes or fails. A transport is exclusively owned by one logical
/// caller; concurrent exchanges need distinct transports.
pub trait Transport: Send + Sync {
    /// Connect to the terminal
    fn connect(&mut self) -> Result<()>;

    /// Close the connection
    ///
    /// Idempotent: closing an absent or already-closed connection is a
    /// no-op. Never fails.
    fn close(&mut self);

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes, looping until the whole buffer is written
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive exactly `n` bytes, accumulating across reads as needed
    fn receive_exact(&mut self, n: usize) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
