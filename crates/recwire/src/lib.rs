//! Stack+heap binary records with zero-copy decoding.
//!
//! # Crate Structure
//!
//! - [`codec`]: layout planning, encoder, bounds-checked decoder, the
//!   `record!` and `wire_enum!` macros
//! - [`frame`]: 4-byte length-prefixed framing over blocking or async I/O
//! - [`records`]: platform request/response records (behind `records` feature)

pub use recwire_codec::{decode, encode, encode_to_vec, record, wire_enum};

/// Re-export codec types.
pub mod codec {
    pub use recwire_codec::*;
}

/// Re-export frame types.
pub mod frame {
    pub use recwire_frame::*;
}

/// Re-export platform records (requires `records` feature).
#[cfg(feature = "records")]
pub mod records {
    pub use recwire_records::*;
}
