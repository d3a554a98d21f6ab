//! `tokio_util::codec` adapter for framed records.

use bytes::BytesMut;
use recwire_codec::{encoded_len, Encode};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, encode_frame, Frame, DEFAULT_MAX_PAYLOAD};
use crate::error::{FrameError, Result};

/// Splits a byte stream into [`Frame`]s and encodes records into frames.
///
/// Use with `tokio_util::codec::Framed`. Decoded frames are handed out as
/// whole frames so callers can choose between owned records and views.
#[derive(Debug, Clone, Copy)]
pub struct RecordCodec {
    max_payload_size: usize,
}

impl RecordCodec {
    pub fn new(max_payload_size: usize) -> Self {
        Self { max_payload_size }
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD)
    }
}

impl Decoder for RecordCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        decode_frame(src, self.max_payload_size)
    }
}

impl<R: Encode> Encoder<&R> for RecordCodec {
    type Error = FrameError;

    fn encode(&mut self, record: &R, dst: &mut BytesMut) -> Result<()> {
        let size = encoded_len(record) as usize;
        if size > self.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size,
                max: self.max_payload_size,
            });
        }
        encode_frame(record, dst);
        Ok(())
    }
}

impl Encoder<Frame> for RecordCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        let size = frame.payload().len();
        if size > self.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size,
                max: self.max_payload_size,
            });
        }
        dst.extend_from_slice(frame.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use recwire_codec::record;

    use super::*;

    record! {
        #[derive(Debug, PartialEq)]
        struct Tick {
            at: i64,
            source: String,
        }
    }

    #[test]
    fn decode_waits_for_complete_frame() {
        let mut codec = RecordCodec::default();
        let mut wire = BytesMut::new();
        codec
            .encode(
                &Tick {
                    at: 5,
                    source: "clock".into(),
                },
                &mut wire,
            )
            .unwrap();

        let mut partial = wire.split_to(6);
        assert!(codec.decode(&mut partial).unwrap().is_none());
        partial.unsplit(wire);

        let frame = codec.decode(&mut partial).unwrap().unwrap();
        assert_eq!(frame.decode::<Tick>().unwrap().source, "clock");
    }

    #[test]
    fn encode_respects_max_payload() {
        let mut codec = RecordCodec::new(8);
        let mut wire = BytesMut::new();
        let err = codec
            .encode(
                &Tick {
                    at: 1,
                    source: "x".into(),
                },
                &mut wire,
            )
            .unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 17, max: 8 }));
        assert!(wire.is_empty());
    }
}
