//! PED protocol frame encoding and response decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{
    error::{Error, Result},
    lrc, FIELD_DELIMITER, LRC_SIZE, MAX_PAYLOAD_SIZE, RESPONSE_HEADER_SIZE, VERSION_TAG,
};

/// Outbound request frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────────┬─────────────┬─────────────┬─────────────┐
/// │ Version tag │   Length    │   Payload   │     LRC     │
/// │   2 bytes   │   2 bytes   │   N bytes   │   1 byte    │
/// │  (ASCII)    │  (BE u16)   │   (bytes)   │ (XOR fold)  │
/// └─────────────┴─────────────┴─────────────┴─────────────┘
/// ```
///
/// The payload is the field list joined with `,` (0x2C); the length prefix
/// is big-endian. Fields must not contain the delimiter byte themselves;
/// the terminal cannot distinguish an embedded comma from a field boundary.
///
/// # Examples
///
/// ```
/// use pedlink_core::Frame;
///
/// let frame = Frame::from_fields(&["123", "456"]).unwrap();
/// let encoded = frame.encode();
/// assert_eq!(&encoded[..], b"V2\x00\x07123,456\x2B");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    /// Build a frame from an ordered field list
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The joined payload is empty (no fields, or only empty fields)
    /// - The joined payload exceeds the 16-bit length prefix
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let mut payload = BytesMut::new();

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                payload.put_u8(FIELD_DELIMITER);
            }
            payload.put_slice(field.as_ref().as_bytes());
        }

        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            payload: payload.freeze(),
        })
    }

    /// Joined payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Calculate the checksum for this frame
    pub fn lrc(&self) -> u8 {
        lrc::fold(&self.payload)
    }

    /// Encode the frame to wire bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use pedlink_core::Frame;
    ///
    /// let frame = Frame::from_fields(&["00"]).unwrap();
    /// assert_eq!(frame.encode().len(), 7); // tag + length + "00" + lrc
    /// ```
    pub fn encode(&self) -> BytesMut {
        let total_size = VERSION_TAG.len() + 2 + self.payload.len() + LRC_SIZE;
        let mut buf = BytesMut::with_capacity(total_size);

        buf.put_slice(&VERSION_TAG);
        buf.put_u16(self.payload.len() as u16);
        buf.put_slice(&self.payload);
        buf.put_u8(self.lrc());

        buf
    }

    /// Total encoded size in bytes
    pub fn size(&self) -> usize {
        VERSION_TAG.len() + 2 + self.payload.len() + LRC_SIZE
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("payload_len", &self.payload.len())
            .field("lrc", &format!("0x{:02X}", self.lrc()))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(len={}, lrc=0x{:02X})", self.payload.len(), self.lrc())
    }
}

/// Decode and validate a response body against its 4-byte header
///
/// Bytes [2..4] of the header carry the big-endian data length M; `body`
/// must be exactly M data bytes followed by one LRC byte. The trailing byte
/// must equal the XOR-fold of the M data bytes.
///
/// Bytes [0..2] of the header are read but not checked against anything.
/// The terminal firmware does not document them and fills them with values
/// that vary between device revisions, so rejecting on their content would
/// refuse legitimate traffic.
///
/// # Errors
///
/// Returns an error if:
/// - `body` is not exactly M+1 bytes
/// - The trailing checksum byte does not match the data
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use pedlink_core::decode_response;
///
/// let header = [0x00, 0x00, 0x00, 0x02];
/// let body = BytesMut::from(&[b'O', b'K', 0x04][..]);
/// let data = decode_response(header, body).unwrap();
/// assert_eq!(&data[..], b"OK");
/// ```
pub fn decode_response(header: [u8; RESPONSE_HEADER_SIZE], mut body: BytesMut) -> Result<Bytes> {
    let declared = u16::from_be_bytes([header[2], header[3]]) as usize;

    trace!(
        reserved = format!("{:02X?}", &header[..2]),
        declared,
        body_len = body.len(),
        "Decoding response"
    );

    if body.len() != declared + LRC_SIZE {
        return Err(Error::TruncatedResponse {
            declared,
            actual: body.len(),
        });
    }

    let data = body.split_to(declared).freeze();
    let received = body[0];

    let calculated = lrc::fold(&data);
    if calculated != received {
        return Err(Error::ChecksumMismatch {
            expected: calculated,
            received,
        });
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frame_round_trip_vector() {
        let frame = Frame::from_fields(&["123", "456"]).unwrap();

        assert_eq!(frame.payload(), b"123,456");
        assert_eq!(frame.lrc(), 0x2B);

        let encoded = frame.encode();
        assert_eq!(&encoded[..2], b"V2");
        assert_eq!(&encoded[2..4], &[0x00, 0x07]);
        assert_eq!(&encoded[4..11], b"123,456");
        assert_eq!(encoded[11], 0x2B);
        assert_eq!(encoded.len(), frame.size());
    }

    #[test]
    fn test_frame_single_field_no_delimiter() {
        let frame = Frame::from_fields(&["ABC"]).unwrap();
        assert_eq!(frame.payload(), b"ABC");
    }

    #[test]
    fn test_frame_empty_field_list() {
        let fields: [&str; 0] = [];
        let result = Frame::from_fields(&fields);

        assert!(matches!(result, Err(Error::EmptyPayload)));
    }

    #[test]
    fn test_frame_single_empty_field() {
        let result = Frame::from_fields(&[""]);

        assert!(matches!(result, Err(Error::EmptyPayload)));
    }

    #[test]
    fn test_frame_two_empty_fields_keep_delimiter() {
        // The joined payload is a lone comma, which is a valid 1-byte payload
        let frame = Frame::from_fields(&["", ""]).unwrap();
        assert_eq!(frame.payload(), b",");
    }

    #[test]
    fn test_frame_payload_too_large() {
        let oversized = "a".repeat(MAX_PAYLOAD_SIZE + 1);
        let result = Frame::from_fields(&[oversized.as_str()]);

        assert!(matches!(
            result,
            Err(Error::PayloadTooLarge { size: 65536, max: 65535 })
        ));
    }

    #[test]
    fn test_frame_payload_at_limit() {
        let at_limit = "a".repeat(MAX_PAYLOAD_SIZE);
        let frame = Frame::from_fields(&[at_limit.as_str()]).unwrap();

        let encoded = frame.encode();
        assert_eq!(&encoded[2..4], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_decode_response_ok() {
        let header = [0x06, 0x00, 0x00, 0x03];
        let body = BytesMut::from(&[b'a', b'b', b'c', lrc::fold(b"abc")][..]);

        let data = decode_response(header, body).unwrap();
        assert_eq!(&data[..], b"abc");
    }

    #[test]
    fn test_decode_response_reserved_bytes_ignored() {
        // Any value in the first two header bytes decodes the same
        let body = || BytesMut::from(&[0x41, 0x41][..]);

        let a = decode_response([0x00, 0x00, 0x00, 0x01], body()).unwrap();
        let b = decode_response([0xDE, 0xAD, 0x00, 0x01], body()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_response_zero_length() {
        // M = 0: no data bytes, checksum folds over nothing to 0x00
        let header = [0x00, 0x00, 0x00, 0x00];
        let body = BytesMut::from(&[0x00][..]);

        let data = decode_response(header, body).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_decode_response_checksum_mismatch() {
        let header = [0x00, 0x00, 0x00, 0x02];
        let body = BytesMut::from(&[b'O', b'K', 0xFF][..]);

        let result = decode_response(header, body);

        if let Err(Error::ChecksumMismatch { expected, received }) = result {
            assert_eq!(expected, 0x04);
            assert_eq!(received, 0xFF);
        } else {
            panic!("Expected ChecksumMismatch error");
        }
    }

    #[test]
    fn test_decode_response_body_too_short() {
        let header = [0x00, 0x00, 0x00, 0x05];
        let body = BytesMut::from(&[1, 2, 3][..]);

        let result = decode_response(header, body);
        assert!(matches!(
            result,
            Err(Error::TruncatedResponse { declared: 5, actual: 3 })
        ));
    }

    #[test]
    fn test_decode_response_body_too_long() {
        // Exact length is required either way
        let header = [0x00, 0x00, 0x00, 0x01];
        let body = BytesMut::from(&[1, 2, 3, 4][..]);

        let result = decode_response(header, body);
        assert!(matches!(result, Err(Error::TruncatedResponse { .. })));
    }

    #[test]
    fn test_frame_debug_does_not_leak_payload() {
        let frame = Frame::from_fields(&["4111111111111111"]).unwrap();
        let rendered = format!("{:?}", frame);

        assert!(!rendered.contains("4111"));
        assert!(rendered.contains("payload_len"));
    }
}
