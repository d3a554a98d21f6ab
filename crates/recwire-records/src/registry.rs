//! Name-indexed table of record types.
//!
//! Lets tooling work with records chosen at runtime: plan a layout, turn
//! the JSON mirror into wire bytes, and back.

use recwire_codec::{decode, encode_to_vec, plan, Decode, Encode, PlannedField};
use recwire_frame::Frame;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auction::{Auction, Bid, Money, PlaceBidRequest};
use crate::error::{RecordError, Result};
use crate::identity::{Profile, SignInRequest, SignInResponse};
use crate::ledger::{LedgerEntry, LedgerPage};
use crate::organization::{CreateOrgRequest, OrgMembers};
use crate::quiddity::{Quiddity, QuiddityRef, WikiPage};

/// Type-erased operations for one record type.
#[derive(Clone, Copy)]
pub struct RecordKind {
    pub name: &'static str,
    pub domain: &'static str,
    pub stack_len: u32,
    plan: fn() -> Vec<PlannedField>,
    encode_json: fn(&Value, u32) -> Result<Vec<u8>>,
    decode_json: fn(&[u8], u32) -> Result<Value>,
    frame_json: fn(&Value) -> Result<Frame>,
    unframe_json: fn(&Frame) -> Result<Value>,
}

impl std::fmt::Debug for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordKind")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("stack_len", &self.stack_len)
            .finish()
    }
}

impl RecordKind {
    const fn of<T>(name: &'static str, domain: &'static str) -> Self
    where
        T: Encode + for<'a> Decode<'a> + Serialize + DeserializeOwned,
    {
        Self {
            name,
            domain,
            stack_len: T::STACK_LEN,
            plan: plan::<T>,
            encode_json: encode_json::<T>,
            decode_json: decode_json::<T>,
            frame_json: frame_json::<T>,
            unframe_json: unframe_json::<T>,
        }
    }

    /// Resolved field offsets.
    pub fn plan(&self) -> Vec<PlannedField> {
        (self.plan)()
    }

    /// Encode a JSON value with `reserved` zeroed leading bytes.
    pub fn encode_json(&self, value: &Value, reserved: u32) -> Result<Vec<u8>> {
        (self.encode_json)(value, reserved)
    }

    /// Decode a buffer whose stack region starts at `stack_offset`.
    pub fn decode_json(&self, buf: &[u8], stack_offset: u32) -> Result<Value> {
        (self.decode_json)(buf, stack_offset)
    }

    /// Encode a JSON value as a transport frame.
    pub fn frame_json(&self, value: &Value) -> Result<Frame> {
        (self.frame_json)(value)
    }

    /// Decode the record carried by a transport frame.
    pub fn unframe_json(&self, frame: &Frame) -> Result<Value> {
        (self.unframe_json)(frame)
    }
}

fn encode_json<T: Encode + DeserializeOwned>(value: &Value, reserved: u32) -> Result<Vec<u8>> {
    let record = T::deserialize(value)?;
    Ok(encode_to_vec(&record, reserved))
}

fn decode_json<T>(buf: &[u8], stack_offset: u32) -> Result<Value>
where
    T: for<'a> Decode<'a> + Serialize,
{
    let record = decode::<T>(buf, stack_offset).inspect_err(|err| {
        tracing::debug!(error = %err, buf_len = buf.len(), stack_offset, "record rejected");
    })?;
    Ok(serde_json::to_value(&record)?)
}

fn frame_json<T: Encode + DeserializeOwned>(value: &Value) -> Result<Frame> {
    let record = T::deserialize(value)?;
    Ok(Frame::from_record(&record))
}

fn unframe_json<T>(frame: &Frame) -> Result<Value>
where
    T: for<'a> Decode<'a> + Serialize,
{
    let record = frame.decode::<T>()?;
    Ok(serde_json::to_value(&record)?)
}

/// Every registered record type.
pub const RECORDS: &[RecordKind] = &[
    RecordKind::of::<SignInRequest>("sign_in_request", "identity"),
    RecordKind::of::<SignInResponse>("sign_in_response", "identity"),
    RecordKind::of::<Profile>("profile", "identity"),
    RecordKind::of::<CreateOrgRequest>("create_org_request", "organization"),
    RecordKind::of::<OrgMembers>("org_members", "organization"),
    RecordKind::of::<QuiddityRef>("quiddity_ref", "quiddity"),
    RecordKind::of::<Quiddity>("quiddity", "quiddity"),
    RecordKind::of::<WikiPage>("wiki_page", "quiddity"),
    RecordKind::of::<Money>("money", "auction"),
    RecordKind::of::<Bid>("bid", "auction"),
    RecordKind::of::<PlaceBidRequest>("place_bid_request", "auction"),
    RecordKind::of::<Auction>("auction", "auction"),
    RecordKind::of::<LedgerEntry>("ledger_entry", "ledger"),
    RecordKind::of::<LedgerPage>("ledger_page", "ledger"),
];

/// Find a record type by name.
pub fn lookup(name: &str) -> Result<&'static RecordKind> {
    RECORDS
        .iter()
        .find(|kind| kind.name == name)
        .ok_or_else(|| {
            tracing::debug!(name, "no record registered under name");
            RecordError::UnknownRecord(name.to_string())
        })
}
