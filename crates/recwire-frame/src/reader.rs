use std::io::{ErrorKind, Read};
use std::net::TcpStream;

use bytes::BytesMut;
use recwire_codec::Decode;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                tracing::debug!(wire_size = frame.wire_size(), "frame received");
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read the next frame and decode it into an owned record.
    ///
    /// To decode a view instead, keep the [`Frame`] from [`read_frame`]
    /// and call [`Frame::decode`] on it.
    ///
    /// [`read_frame`]: FrameReader::read_frame
    pub fn read_record<R>(&mut self) -> Result<R>
    where
        R: for<'a> Decode<'a>,
    {
        let frame = self.read_frame()?;
        frame.decode::<R>().inspect_err(|err| {
            tracing::debug!(error = %err, "rejecting malformed record");
        })
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent frame decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl FrameReader<TcpStream> {
    /// Create a frame reader for a TCP stream and apply read timeout from config.
    pub fn with_config_tcp(inner: TcpStream, config: FrameConfig) -> Result<Self> {
        inner.set_read_timeout(config.read_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use bytes::{BufMut, BytesMut};
    use recwire_codec::{record, DecodeError};

    use super::*;
    use crate::codec::encode_frame;
    use crate::writer::FrameWriter;

    record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Ping {
            seq: u32,
            body: Vec<u8>,
        }
    }

    fn ping(seq: u32, body: &[u8]) -> Ping {
        Ping {
            seq,
            body: body.to_vec(),
        }
    }

    fn wire_of(records: &[Ping]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        for record in records {
            encode_frame(record, &mut wire);
        }
        wire.to_vec()
    }

    #[test]
    fn read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(wire_of(&[ping(1, b"hello")])));
        let record: Ping = reader.read_record().unwrap();
        assert_eq!(record, ping(1, b"hello"));
    }

    #[test]
    fn read_multiple_frames() {
        let sent = [ping(1, b"one"), ping(2, b"two"), ping(3, b"three")];
        let mut reader = FrameReader::new(Cursor::new(wire_of(&sent)));

        for expected in &sent {
            assert_eq!(&reader.read_record::<Ping>().unwrap(), expected);
        }
    }

    #[test]
    fn read_frame_with_large_payload() {
        let body = vec![0xAB; 64 * 1024];
        let mut reader = FrameReader::new(Cursor::new(wire_of(&[ping(9, &body)])));
        let record: Ping = reader.read_record().unwrap();

        assert_eq!(record.seq, 9);
        assert_eq!(record.body, body);
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire_of(&[ping(4, b"slow")]),
            pos: 0,
        };
        let mut reader = FrameReader::new(byte_reader);

        assert_eq!(reader.read_record::<Ping>().unwrap(), ping(4, b"slow"));
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut partial = BytesMut::new();
        partial.put_u32_le(16);
        partial.put_slice(b"only-part");

        let mut reader = FrameReader::new(Cursor::new(partial.to_vec()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn malformed_record_is_reported_and_stream_continues() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(12);
        wire.put_u32_le(7);
        // body descriptor points far past the frame.
        wire.put_u32_le(1000);
        wire.put_u32_le(1);
        encode_frame(&ping(2, b"next"), &mut wire);

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let err = reader.read_record::<Ping>().unwrap_err();
        assert!(matches!(
            err,
            FrameError::Decode(DecodeError::DescriptorOutOfBounds { offset: 1000, .. })
        ));
        assert_eq!(reader.read_record::<Ping>().unwrap(), ping(2, b"next"));
    }

    #[test]
    fn oversized_frame_in_stream() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(1024);

        let cfg = FrameConfig {
            max_payload_size: 16,
            ..FrameConfig::default()
        };
        let mut reader = FrameReader::with_config(Cursor::new(wire.to_vec()), cfg);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            if buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    #[cfg(unix)]
    fn roundtrip_over_pipe() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = FrameWriter::new(left);
        let mut reader = FrameReader::new(right);

        writer.send(&ping(1, b"ping")).unwrap();
        assert_eq!(reader.read_record::<Ping>().unwrap(), ping(1, b"ping"));
    }

    #[test]
    #[cfg(unix)]
    fn concurrent_reader_writer_threads() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = FrameWriter::new(left);
        let reader = Arc::new(Mutex::new(FrameReader::new(right)));

        let reader_thread = {
            let reader = Arc::clone(&reader);
            std::thread::spawn(move || {
                for expected in 0..64u32 {
                    let record: Ping = reader.lock().unwrap().read_record().unwrap();
                    assert_eq!(record.seq, expected);
                    assert_eq!(record.body, format!("msg-{expected}").into_bytes());
                }
            })
        };

        for i in 0..64u32 {
            writer.send(&ping(i, format!("msg-{i}").as_bytes())).unwrap();
        }

        reader_thread.join().unwrap();
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = FrameReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        reader.set_max_payload_size(64);
        assert_eq!(reader.config().max_payload_size, 64);
        let _inner = reader.into_inner();
    }

    #[test]
    fn read_would_block_propagates_io_error() {
        let reader = FailOnceThenData {
            kind: ErrorKind::WouldBlock,
            failed: false,
            bytes: wire_of(&[ping(7, b"ok")]),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        let err = framed.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = FailOnceThenData {
            kind: ErrorKind::Interrupted,
            failed: false,
            bytes: wire_of(&[ping(8, b"ok")]),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        assert_eq!(framed.read_record::<Ping>().unwrap(), ping(8, b"ok"));
    }

    struct FailOnceThenData {
        kind: ErrorKind,
        failed: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for FailOnceThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::from(self.kind));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn applies_read_timeout_for_tcp_stream() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).unwrap();
        let (_server, _) = listener.accept().unwrap();

        let cfg = FrameConfig {
            read_timeout: Some(std::time::Duration::from_millis(10)),
            ..FrameConfig::default()
        };

        let reader = FrameReader::with_config_tcp(client, cfg).unwrap();
        assert_eq!(
            reader.get_ref().read_timeout().unwrap(),
            Some(std::time::Duration::from_millis(10))
        );
    }
}
