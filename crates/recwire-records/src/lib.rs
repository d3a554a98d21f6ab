//! Platform request/response records.
//!
//! One module per service domain. Owned records derive serde for the JSON
//! mirror used by the HTTP variant of each endpoint; identifiers appear
//! there as lowercase hex. `*View` records borrow their variable fields
//! from the receive buffer.

pub mod auction;
pub mod error;
pub mod hex;
pub mod identity;
pub mod ledger;
pub mod organization;
pub mod quiddity;
pub mod registry;

pub use error::{RecordError, Result};
pub use registry::{lookup, RecordKind, RECORDS};

/// 32-byte entity identifier.
pub type Id = [u8; 32];

/// 16-byte opaque token (sessions, devices, idempotency keys).
pub type Token = [u8; 16];
