//! Stack+heap binary record codec.
//!
//! Every record is encoded as a fixed-size stack region followed by a
//! variable-size heap region:
//!
//! ```text
//! ┌────────────────────┬──────────────────────────┬─────────────────────────┐
//! │ Reserved header    │ Stack region             │ Heap region             │
//! │ (transport-owned)  │ scalars, arrays,         │ string/slice bytes in   │
//! │                    │ (offset, len) slots      │ field declaration order │
//! └────────────────────┴──────────────────────────┴─────────────────────────┘
//! ```
//!
//! Integers are little-endian. Descriptor offsets are absolute within the
//! buffer handed to the codec. Records are declared with [`record!`] and
//! enums with [`wire_enum!`]; decoding validates every descriptor before
//! slicing, so malformed input is rejected rather than read out of bounds.

pub mod decoder;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod field;
pub mod layout;
pub mod record;
pub mod view;

use bytes::BytesMut;

pub use decoder::{Decode, Decoder};
pub use descriptor::{Descriptor, DESCRIPTOR_SIZE};
pub use encoder::{add_len, wire_len, Encode, Encoder};
pub use error::{DecodeError, Result};
pub use layout::{encoded_len, plan, FieldKind, FieldSpec, Layout, PlannedField};
pub use view::ArrayView;

/// Encode `value` into `buf` with its stack region starting at
/// `stack_offset`. Returns the end of the heap region.
///
/// `buf` must hold at least `stack_offset + encoded_len(value)` bytes;
/// bytes before `stack_offset` are left untouched.
///
/// # Panics
///
/// Panics if `buf` is too small, or if the encoded record would end past
/// `u32::MAX` (see [`Layout::heap_len`]).
pub fn encode<T: Encode>(value: &T, buf: &mut [u8], stack_offset: u32) -> u32 {
    let heap = add_len(stack_offset, T::STACK_LEN);
    let mut enc = Encoder::new(buf);
    let end = value.encode_at(&mut enc, stack_offset, heap);
    debug_assert_eq!(
        end,
        add_len(heap, value.heap_len()),
        "encoder and layout planner disagree on heap length"
    );
    end
}

/// Encode `value` into a fresh buffer with `reserved` zeroed leading bytes.
pub fn encode_to_vec<T: Encode>(value: &T, reserved: u32) -> Vec<u8> {
    let mut buf = vec![0u8; add_len(reserved, encoded_len(value)) as usize];
    encode(value, &mut buf, reserved);
    buf
}

/// Append `reserved` zeroed bytes followed by the encoded `value` to `dst`.
///
/// Descriptor offsets are relative to the start of the appended span, so
/// each appended record is self-contained.
pub fn encode_to_bytes<T: Encode>(value: &T, reserved: u32, dst: &mut BytesMut) {
    let start = dst.len();
    let total = add_len(reserved, encoded_len(value)) as usize;
    dst.resize(start + total, 0);
    encode(value, &mut dst[start..], reserved);
}

/// Decode a `T` whose stack region starts at `stack_offset`.
///
/// Fails with [`DecodeError::BufferTooSmall`] before reading anything when
/// the buffer cannot hold `T`'s stack region.
pub fn decode<'a, T: Decode<'a>>(buf: &'a [u8], stack_offset: u32) -> Result<T> {
    let dec = Decoder::new(buf, stack_offset, T::STACK_LEN)?;
    T::decode_at(&dec, stack_offset)
}
