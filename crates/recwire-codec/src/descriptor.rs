//! Heap descriptors.
//!
//! Every variable-length field occupies one descriptor slot on the stack:
//!
//! ```text
//! ┌──────────────┬──────────────┐
//! │ Offset (4B)  │ Length (4B)  │
//! │ LE, absolute │ LE           │
//! └──────────────┴──────────────┘
//! ```
//!
//! `offset` is measured from the start of the buffer handed to the codec,
//! reserved header bytes included. `len` is a byte count for strings and
//! byte slices and an element count for slices of fixed-size arrays.

/// Size of a descriptor slot in the stack region.
pub const DESCRIPTOR_SIZE: u32 = 8;

/// An `(offset, len)` pair pointing into the heap region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descriptor {
    pub offset: u32,
    pub len: u32,
}

impl Descriptor {
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Serialize into the on-wire slot representation.
    pub fn to_le_bytes(self) -> [u8; DESCRIPTOR_SIZE as usize] {
        let mut out = [0u8; DESCRIPTOR_SIZE as usize];
        out[..4].copy_from_slice(&self.offset.to_le_bytes());
        out[4..].copy_from_slice(&self.len.to_le_bytes());
        out
    }

    /// Parse the on-wire slot representation.
    pub fn from_le_bytes(raw: [u8; DESCRIPTOR_SIZE as usize]) -> Self {
        let [o0, o1, o2, o3, l0, l1, l2, l3] = raw;
        Self {
            offset: u32::from_le_bytes([o0, o1, o2, o3]),
            len: u32::from_le_bytes([l0, l1, l2, l3]),
        }
    }
}
