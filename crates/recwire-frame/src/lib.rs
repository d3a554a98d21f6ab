//! Length-prefixed transport framing for recwire records.
//!
//! Every frame reserves a 4-byte little-endian header holding the record's
//! encoded length, followed by the record's stack and heap regions. Records
//! are encoded with their stack region at offset 4, so a received frame is
//! decoded in place without re-basing any descriptor.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub mod record_codec;

pub use codec::{decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use record_codec::RecordCodec;
