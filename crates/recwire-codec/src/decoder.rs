use crate::descriptor::{Descriptor, DESCRIPTOR_SIZE};
use crate::error::{DecodeError, Result};
use crate::layout::Layout;

/// Reads a value back out of a buffer.
///
/// `'a` is the lifetime of the received buffer. Owned field types copy out
/// of it; view types (`&'a str`, `&'a [u8]`, [`ArrayView`](crate::ArrayView))
/// borrow from it and keep it alive for as long as they are used.
pub trait Decode<'a>: Layout + Sized {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self>;
}

/// Bounds-checked reader over a received buffer.
///
/// Created once per top-level record. `heap_start` is fixed to the end of
/// that record's stack region so nested composites validate their
/// descriptors against the same heap.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    heap_start: u32,
}

impl<'a> Decoder<'a> {
    /// Prepare to decode a record whose stack region starts at
    /// `stack_offset` and spans `stack_len` bytes.
    ///
    /// Fails with [`DecodeError::BufferTooSmall`] when the stack region does
    /// not fit.
    pub fn new(buf: &'a [u8], stack_offset: u32, stack_len: u32) -> Result<Self> {
        let needed = stack_offset as usize + stack_len as usize;
        let heap_start = stack_offset.checked_add(stack_len);
        match heap_start {
            Some(heap_start) if buf.len() >= needed => Ok(Self { buf, heap_start }),
            _ => Err(DecodeError::BufferTooSmall {
                needed,
                available: buf.len(),
            }),
        }
    }

    /// Read `N` bytes at an absolute offset.
    #[inline]
    pub fn fixed<const N: usize>(&self, at: u32) -> Result<[u8; N]> {
        let start = at as usize;
        let bytes = self
            .buf
            .get(start..start + N)
            .ok_or(DecodeError::BufferTooSmall {
                needed: start + N,
                available: self.buf.len(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn descriptor(&self, at: u32) -> Result<Descriptor> {
        self.fixed::<{ DESCRIPTOR_SIZE as usize }>(at)
            .map(Descriptor::from_le_bytes)
    }

    /// Resolve a descriptor to the heap bytes it covers.
    ///
    /// `width` is the size of one element: 1 for strings and byte slices,
    /// `N` for slices of `[u8; N]`. The span must start at or after the heap
    /// region and end within the buffer.
    pub fn heap_slice(&self, descriptor: Descriptor, width: u32) -> Result<&'a [u8]> {
        let Descriptor { offset, len } = descriptor;
        let byte_len = u64::from(len) * u64::from(width);
        let end = u64::from(offset) + byte_len;

        if offset < self.heap_start || end > self.buf.len() as u64 {
            tracing::trace!(
                offset,
                byte_len,
                heap_start = self.heap_start,
                buf_len = self.buf.len(),
                "rejecting out-of-bounds descriptor"
            );
            return Err(DecodeError::DescriptorOutOfBounds {
                offset,
                len: byte_len,
                heap_start: self.heap_start,
                buf_len: self.buf.len(),
            });
        }

        Ok(&self.buf[offset as usize..end as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_buffer_shorter_than_stack() {
        let buf = [0u8; 7];
        let err = Decoder::new(&buf, 0, 8).unwrap_err();
        assert_eq!(
            err,
            DecodeError::BufferTooSmall {
                needed: 8,
                available: 7
            }
        );
    }

    #[test]
    fn stack_offset_counts_towards_minimum() {
        let buf = [0u8; 10];
        assert!(Decoder::new(&buf, 4, 6).is_ok());
        assert!(matches!(
            Decoder::new(&buf, 4, 7),
            Err(DecodeError::BufferTooSmall { needed: 11, .. })
        ));
    }

    #[test]
    fn overflowing_stack_offset_is_too_small() {
        let buf = [0u8; 4];
        assert!(matches!(
            Decoder::new(&buf, u32::MAX, 8),
            Err(DecodeError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn heap_slice_resolves_span() {
        let mut buf = [0u8; 13];
        buf[8..].copy_from_slice(b"hello");
        let dec = Decoder::new(&buf, 0, 8).unwrap();
        let bytes = dec.heap_slice(Descriptor::new(8, 5), 1).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn heap_slice_allows_empty_span_at_end() {
        let buf = [0u8; 8];
        let dec = Decoder::new(&buf, 0, 8).unwrap();
        assert!(dec.heap_slice(Descriptor::new(8, 0), 1).unwrap().is_empty());
    }

    #[test]
    fn heap_slice_rejects_span_into_stack() {
        let buf = [0u8; 16];
        let dec = Decoder::new(&buf, 0, 8).unwrap();
        let err = dec.heap_slice(Descriptor::new(4, 2), 1).unwrap_err();
        assert!(matches!(err, DecodeError::DescriptorOutOfBounds { offset: 4, .. }));
    }

    #[test]
    fn heap_slice_rejects_span_past_end() {
        let buf = [0u8; 16];
        let dec = Decoder::new(&buf, 0, 8).unwrap();
        let err = dec.heap_slice(Descriptor::new(8, 9), 1).unwrap_err();
        assert!(matches!(err, DecodeError::DescriptorOutOfBounds { len: 9, .. }));
    }

    #[test]
    fn heap_slice_element_count_cannot_overflow() {
        let buf = [0u8; 16];
        let dec = Decoder::new(&buf, 0, 8).unwrap();
        let err = dec
            .heap_slice(Descriptor::new(u32::MAX, u32::MAX), 32)
            .unwrap_err();
        assert!(matches!(err, DecodeError::DescriptorOutOfBounds { .. }));
    }
}
