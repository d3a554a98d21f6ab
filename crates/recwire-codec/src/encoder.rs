use crate::descriptor::Descriptor;
use crate::layout::Layout;

/// Writes a value's fixed fields into the stack region and appends its
/// variable payloads to the heap region.
///
/// `at` is the absolute offset of the value's first stack byte and `heap`
/// the current heap cursor. Implementations return the advanced cursor.
pub trait Encode: Layout {
    fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32;
}

/// Positional writer over a caller-owned buffer.
///
/// The buffer must already be sized by the layout planner. Writes past the
/// end panic: an undersized buffer is a bug in the caller, not a runtime
/// condition.
pub struct Encoder<'b> {
    buf: &'b mut [u8],
}

impl<'b> Encoder<'b> {
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf }
    }

    /// Copy raw bytes to an absolute offset.
    #[inline]
    pub fn put_slice(&mut self, at: u32, bytes: &[u8]) {
        let start = at as usize;
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
    }

    #[inline]
    pub fn put_u8(&mut self, at: u32, value: u8) {
        self.buf[at as usize] = value;
    }

    #[inline]
    pub fn put_u16_le(&mut self, at: u32, value: u16) {
        self.put_slice(at, &value.to_le_bytes());
    }

    #[inline]
    pub fn put_u32_le(&mut self, at: u32, value: u32) {
        self.put_slice(at, &value.to_le_bytes());
    }

    #[inline]
    pub fn put_u64_le(&mut self, at: u32, value: u64) {
        self.put_slice(at, &value.to_le_bytes());
    }

    #[inline]
    pub fn put_descriptor(&mut self, at: u32, descriptor: Descriptor) {
        self.put_slice(at, &descriptor.to_le_bytes());
    }

    /// Append `bytes` at the heap cursor and describe them from the stack
    /// slot at `at`. `count` is what the descriptor records as its length:
    /// the byte length for strings, the element count for array slices.
    pub fn put_heap(&mut self, at: u32, heap: u32, bytes: &[u8], count: u32) -> u32 {
        self.put_slice(heap, bytes);
        self.put_descriptor(at, Descriptor::new(heap, count));
        add_len(heap, wire_len(bytes.len()))
    }
}

/// Convert an in-memory length to its wire width.
///
/// # Panics
///
/// Panics when `len` exceeds `u32::MAX`, the largest span a descriptor
/// can address.
#[inline]
pub fn wire_len(len: usize) -> u32 {
    u32::try_from(len).expect("length exceeds the u32 wire size limit")
}

/// Add two wire lengths, panicking past `u32::MAX`.
#[inline]
pub fn add_len(a: u32, b: u32) -> u32 {
    a.checked_add(b)
        .expect("record exceeds the u32 wire size limit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_little_endian() {
        let mut buf = [0u8; 15];
        let mut enc = Encoder::new(&mut buf);
        enc.put_u8(0, 0xAA);
        enc.put_u16_le(1, 0x0102);
        enc.put_u32_le(3, 0x0304_0506);
        enc.put_u64_le(7, 0x0708_090A_0B0C_0D0E);

        assert_eq!(
            buf,
            [
                0xAA, 0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0x0E, 0x0D, 0x0C, 0x0B, 0x0A, 0x09,
                0x08, 0x07
            ]
        );
    }

    #[test]
    fn put_heap_writes_descriptor_and_advances() {
        let mut buf = [0u8; 13];
        let mut enc = Encoder::new(&mut buf);
        let next = enc.put_heap(0, 8, b"hello", 5);

        assert_eq!(next, 13);
        assert_eq!(&buf[..4], &8u32.to_le_bytes());
        assert_eq!(&buf[4..8], &5u32.to_le_bytes());
        assert_eq!(&buf[8..], b"hello");
    }

    #[test]
    fn wire_len_accepts_u32_range() {
        assert_eq!(wire_len(0), 0);
        assert_eq!(wire_len(u32::MAX as usize), u32::MAX);
        assert_eq!(add_len(u32::MAX - 1, 1), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "u32 wire size limit")]
    fn wire_len_rejects_oversized_length() {
        wire_len(u32::MAX as usize + 1);
    }

    #[test]
    #[should_panic(expected = "u32 wire size limit")]
    fn add_len_rejects_overflow() {
        add_len(u32::MAX, 1);
    }

    #[test]
    #[should_panic]
    fn undersized_buffer_panics() {
        let mut buf = [0u8; 4];
        let mut enc = Encoder::new(&mut buf);
        enc.put_u64_le(0, 1);
    }
}
