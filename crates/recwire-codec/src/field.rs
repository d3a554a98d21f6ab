//! Codec implementations for the primitive field types.
//!
//! | Rust type                  | stack | heap              |
//! |----------------------------|-------|-------------------|
//! | `u8`..`u64`, `i8`..`i64`   | 1-8   | -                 |
//! | `bool`                     | 1     | -                 |
//! | `[u8; N]`                  | N     | -                 |
//! | `String`, `&str`           | 8     | UTF-8 bytes       |
//! | `Vec<u8>`, `&[u8]`         | 8     | raw bytes         |
//! | `Vec<[u8; N]>`, `ArrayView`| 8     | `count * N` bytes |

use crate::decoder::{Decode, Decoder};
use crate::descriptor::DESCRIPTOR_SIZE;
use crate::encoder::{wire_len, Encode, Encoder};
use crate::error::{DecodeError, Result};
use crate::layout::{FieldKind, Layout};

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Layout for $ty {
                const STACK_LEN: u32 = std::mem::size_of::<$ty>() as u32;
                const KIND: FieldKind = FieldKind::Scalar;

                #[inline]
                fn heap_len(&self) -> u32 {
                    0
                }
            }

            impl Encode for $ty {
                #[inline]
                fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
                    enc.put_slice(at, &self.to_le_bytes());
                    heap
                }
            }

            impl<'a> Decode<'a> for $ty {
                #[inline]
                fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
                    Ok(<$ty>::from_le_bytes(dec.fixed(at)?))
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Layout for bool {
    const STACK_LEN: u32 = 1;
    const KIND: FieldKind = FieldKind::Scalar;

    fn heap_len(&self) -> u32 {
        0
    }
}

impl Encode for bool {
    fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
        enc.put_u8(at, u8::from(*self));
        heap
    }
}

impl<'a> Decode<'a> for bool {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        match dec.fixed::<1>(at)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [value] => Err(DecodeError::InvalidBool { value }),
        }
    }
}

impl<const N: usize> Layout for [u8; N] {
    const STACK_LEN: u32 = N as u32;
    const KIND: FieldKind = FieldKind::Array;

    fn heap_len(&self) -> u32 {
        0
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
        enc.put_slice(at, self);
        heap
    }
}

impl<'a, const N: usize> Decode<'a> for [u8; N] {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        dec.fixed::<N>(at)
    }
}

fn decode_str<'a>(dec: &Decoder<'a>, at: u32) -> Result<&'a str> {
    let descriptor = dec.descriptor(at)?;
    let bytes = dec.heap_slice(descriptor, 1)?;
    std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
        offset: descriptor.offset,
    })
}

fn decode_bytes<'a>(dec: &Decoder<'a>, at: u32) -> Result<&'a [u8]> {
    let descriptor = dec.descriptor(at)?;
    dec.heap_slice(descriptor, 1)
}

macro_rules! impl_byte_field {
    ($ty:ty, $as_bytes:ident) => {
        impl Layout for $ty {
            const STACK_LEN: u32 = DESCRIPTOR_SIZE;
            const KIND: FieldKind = FieldKind::Bytes;

            fn heap_len(&self) -> u32 {
                wire_len(self.len())
            }
        }

        impl Encode for $ty {
            fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
                let bytes: &[u8] = self.$as_bytes();
                enc.put_heap(at, heap, bytes, wire_len(bytes.len()))
            }
        }
    };
}

impl_byte_field!(String, as_bytes);
impl_byte_field!(&str, as_bytes);
impl_byte_field!(Vec<u8>, as_slice);
impl_byte_field!(&[u8], as_ref);

impl<'a> Decode<'a> for String {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        decode_str(dec, at).map(str::to_owned)
    }
}

impl<'a> Decode<'a> for &'a str {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        decode_str(dec, at)
    }
}

impl<'a> Decode<'a> for Vec<u8> {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        decode_bytes(dec, at).map(<[u8]>::to_vec)
    }
}

impl<'a> Decode<'a> for &'a [u8] {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        decode_bytes(dec, at)
    }
}

impl<const N: usize> Layout for Vec<[u8; N]> {
    const STACK_LEN: u32 = DESCRIPTOR_SIZE;
    const KIND: FieldKind = FieldKind::Slice;

    fn heap_len(&self) -> u32 {
        wire_len(self.as_flattened().len())
    }
}

impl<const N: usize> Encode for Vec<[u8; N]> {
    fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
        enc.put_heap(at, heap, self.as_flattened(), wire_len(self.len()))
    }
}

impl<'a, const N: usize> Decode<'a> for Vec<[u8; N]> {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        let view = crate::view::ArrayView::<'a, N>::decode_at(dec, at)?;
        Ok(view.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T>(value: T) -> T
    where
        T: Encode + for<'a> Decode<'a>,
    {
        let buf = crate::encode_to_vec(&value, 0);
        crate::decode::<T>(&buf, 0).unwrap()
    }

    #[test]
    fn scalar_widths() {
        assert_eq!(u8::STACK_LEN, 1);
        assert_eq!(i16::STACK_LEN, 2);
        assert_eq!(u32::STACK_LEN, 4);
        assert_eq!(i64::STACK_LEN, 8);
        assert_eq!(bool::STACK_LEN, 1);
        assert_eq!(<[u8; 16]>::STACK_LEN, 16);
    }

    #[test]
    fn extreme_scalars_survive() {
        assert_eq!(roundtrip(u64::MAX), u64::MAX);
        assert_eq!(roundtrip(i64::MIN), i64::MIN);
        assert_eq!(roundtrip(i8::MIN), i8::MIN);
        assert!(roundtrip(true));
        assert!(!roundtrip(false));
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let buf = [2u8];
        let err = crate::decode::<bool>(&buf, 0).unwrap_err();
        assert_eq!(err, DecodeError::InvalidBool { value: 2 });
    }

    #[test]
    fn variable_fields_use_one_descriptor() {
        assert_eq!(String::STACK_LEN, DESCRIPTOR_SIZE);
        assert_eq!(<&str>::STACK_LEN, DESCRIPTOR_SIZE);
        assert_eq!(Vec::<u8>::STACK_LEN, DESCRIPTOR_SIZE);
        assert_eq!(Vec::<[u8; 32]>::STACK_LEN, DESCRIPTOR_SIZE);
    }

    #[test]
    fn string_heap_is_raw_bytes() {
        let value = String::from("héllo");
        assert_eq!(value.heap_len(), 6);
        let buf = crate::encode_to_vec(&value, 0);
        assert_eq!(&buf[8..], "héllo".as_bytes());
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let buf = crate::encode_to_vec(&vec![0xFFu8, 0xFE], 0);
        assert_eq!(buf.len(), 10);
        let err = crate::decode::<String>(&buf, 0).unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { offset: 8 });
    }

    #[test]
    fn empty_slice_has_zero_length_descriptor() {
        let ids: Vec<[u8; 32]> = Vec::new();
        let buf = crate::encode_to_vec(&ids, 0);
        assert_eq!(buf, [8, 0, 0, 0, 0, 0, 0, 0]);
        assert!(roundtrip(ids).is_empty());
    }

    #[test]
    fn array_slice_descriptor_counts_elements() {
        let ids = vec![[1u8; 16], [2u8; 16]];
        let buf = crate::encode_to_vec(&ids, 0);
        assert_eq!(buf.len(), 8 + 32);
        assert_eq!(&buf[4..8], &2u32.to_le_bytes());
        assert_eq!(roundtrip(ids.clone()), ids);
    }

    #[test]
    fn borrowed_fields_point_into_buffer() {
        let buf = crate::encode_to_vec(&"zero-copy", 0);
        let view = crate::decode::<&str>(&buf, 0).unwrap();
        assert_eq!(view, "zero-copy");
        assert_eq!(view.as_ptr(), buf[8..].as_ptr());
    }
}
