use bytes::{Bytes, BytesMut};
use recwire_codec::{encode_to_bytes, encoded_len, Decode, Encode};

use crate::error::{FrameError, Result};

/// Frame header: payload length (4 bytes, little-endian).
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// A complete frame as it travels on the wire, header included.
///
/// Keeping the header makes the buffer match what the encoder wrote, so
/// descriptor offsets resolve without adjustment. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    wire: Bytes,
}

impl Frame {
    /// Encode a record into a standalone frame.
    pub fn from_record<T: Encode>(record: &T) -> Self {
        let mut dst = BytesMut::new();
        encode_frame(record, &mut dst);
        Self {
            wire: dst.freeze(),
        }
    }

    /// Wrap bytes received from elsewhere, checking the header against the
    /// actual length.
    pub fn from_wire(wire: Bytes) -> Result<Self> {
        if wire.len() < HEADER_SIZE {
            return Err(FrameError::LengthMismatch {
                declared: HEADER_SIZE,
                actual: wire.len(),
            });
        }
        let declared = read_header(&wire);
        let actual = wire.len() - HEADER_SIZE;
        if declared != actual {
            return Err(FrameError::LengthMismatch { declared, actual });
        }
        Ok(Self { wire })
    }

    /// The record bytes past the reserved header.
    pub fn payload(&self) -> &[u8] {
        &self.wire[HEADER_SIZE..]
    }

    /// The full wire representation, header included.
    pub fn as_bytes(&self) -> &Bytes {
        &self.wire
    }

    pub fn into_bytes(self) -> Bytes {
        self.wire
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        self.wire.len()
    }

    /// Decode the carried record.
    ///
    /// View records borrow from this frame and keep it alive.
    pub fn decode<'a, T: Decode<'a>>(&'a self) -> Result<T> {
        Ok(recwire_codec::decode(&self.wire, HEADER_SIZE as u32)?)
    }
}

fn read_header(src: &[u8]) -> usize {
    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&src[..HEADER_SIZE]);
    u32::from_le_bytes(header) as usize
}

/// Encode a record into the wire format, appending to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────────────┬────────────────────┬─────────────────────┐
/// │ Length (4B)  │ Stack region       │ Heap region         │
/// │ LE           │ (record STACK_LEN) │ (record heap_len()) │
/// └──────────────┴────────────────────┴─────────────────────┘
/// ```
///
/// Descriptor offsets inside the record count from the first header byte.
pub fn encode_frame<T: Encode>(record: &T, dst: &mut BytesMut) {
    let start = dst.len();
    let len = encoded_len(record);
    dst.reserve(HEADER_SIZE + len as usize);
    encode_to_bytes(record, HEADER_SIZE as u32, dst);
    dst[start..start + HEADER_SIZE].copy_from_slice(&len.to_le_bytes());
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let payload_len = read_header(src);
    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None); // Need more data
    }

    let wire = src.split_to(total).freeze();
    Ok(Some(Frame { wire }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
