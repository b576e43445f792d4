//! Longitudinal redundancy check
//!
//! Every frame carries a single trailing LRC byte:
//! 1. Start from 0x00
//! 2. XOR each payload byte into the accumulator, left to right
//! 3. The final accumulator value is the checksum

use tracing::trace;

/// Calculate the LRC of a byte sequence
///
/// # Algorithm
///
/// ```text
/// lrc = 0
/// for byte in data: lrc ^= byte
/// ```
///
/// # Examples
///
/// ```
/// use pedlink_core::lrc;
///
/// let checksum = lrc::fold(b"123,456");
/// assert_eq!(checksum, 0x2B);
/// ```
pub fn fold(data: &[u8]) -> u8 {
    let mut lrc = 0u8;

    for byte in data {
        lrc ^= byte;
    }

    trace!(
        len = data.len(),
        lrc = format!("0x{:02X}", lrc),
        "Calculated LRC"
    );

    lrc
}

/// Verify an LRC byte against a data slice
pub fn verify(data: &[u8], expected: u8) -> bool {
    fold(data) == expected
}
