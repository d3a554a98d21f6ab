use std::fmt;

use crate::decoder::{Decode, Decoder};
use crate::descriptor::DESCRIPTOR_SIZE;
use crate::encoder::{wire_len, Encode, Encoder};
use crate::error::Result;
use crate::layout::{FieldKind, Layout};

/// Zero-copy view of a slice of `[u8; N]` elements in a received buffer.
///
/// The borrowed counterpart of `Vec<[u8; N]>`. It shares the wire layout,
/// so a record can be decoded with either field type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayView<'a, const N: usize> {
    bytes: &'a [u8],
}

impl<'a, const N: usize> ArrayView<'a, N> {
    const WIDTH: usize = {
        assert!(N > 0, "ArrayView element width must be non-zero");
        N
    };

    /// Wrap `bytes`, which must hold a whole number of elements.
    ///
    /// Returns `None` when the length is not a multiple of `N`.
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        (bytes.len() % Self::WIDTH == 0).then_some(Self { bytes })
    }

    pub fn empty() -> Self {
        Self { bytes: &[] }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / Self::WIDTH
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8; N]> {
        let start = index.checked_mul(N)?;
        let end = start.checked_add(N)?;
        self.bytes.get(start..end)?.try_into().ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8; N]> + 'a {
        self.bytes
            .chunks_exact(Self::WIDTH)
            .filter_map(|chunk| <&[u8; N]>::try_from(chunk).ok())
    }

    /// The raw heap bytes behind this view.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn to_vec(&self) -> Vec<[u8; N]> {
        self.bytes
            .chunks_exact(Self::WIDTH)
            .map(|chunk| {
                let mut item = [0u8; N];
                item.copy_from_slice(chunk);
                item
            })
            .collect()
    }
}

impl<'a, const N: usize> From<&'a [[u8; N]]> for ArrayView<'a, N> {
    fn from(items: &'a [[u8; N]]) -> Self {
        Self {
            bytes: items.as_flattened(),
        }
    }
}

impl<const N: usize> fmt::Debug for ArrayView<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("width", &N)
            .field("len", &self.len())
            .finish()
    }
}

impl<const N: usize> PartialEq<Vec<[u8; N]>> for ArrayView<'_, N> {
    fn eq(&self, other: &Vec<[u8; N]>) -> bool {
        self.bytes == other.as_flattened()
    }
}

impl<const N: usize> Layout for ArrayView<'_, N> {
    const STACK_LEN: u32 = DESCRIPTOR_SIZE;
    const KIND: FieldKind = FieldKind::Slice;

    fn heap_len(&self) -> u32 {
        wire_len(self.bytes.len())
    }
}

impl<const N: usize> Encode for ArrayView<'_, N> {
    fn encode_at(&self, enc: &mut Encoder<'_>, at: u32, heap: u32) -> u32 {
        enc.put_heap(at, heap, self.bytes, wire_len(self.len()))
    }
}

impl<'a, const N: usize> Decode<'a> for ArrayView<'a, N> {
    fn decode_at(dec: &Decoder<'a>, at: u32) -> Result<Self> {
        let descriptor = dec.descriptor(at)?;
        let bytes = dec.heap_slice(descriptor, Self::WIDTH as u32)?;
        Ok(Self { bytes })
    }
}
