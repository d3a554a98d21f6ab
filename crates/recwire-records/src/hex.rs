//! Hex text form of identifiers and byte fields in the JSON mirror.

use std::fmt::Write;

use serde::{de, Deserialize, Deserializer, Serializer};

use crate::error::{RecordError, Result};

/// Lowercase hex encoding.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decode hex, accepting either case and ignoring ASCII whitespace.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(RecordError::Hex(format!(
            "odd number of digits ({})",
            digits.len()
        )));
    }
    digits
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

/// Decode hex into a fixed-size array.
pub fn decode_array<const N: usize>(text: &str) -> Result<[u8; N]> {
    let bytes = decode(text)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        RecordError::Hex(format!("expected {N} bytes, got {}", bytes.len()))
    })
}

fn nibble(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => Err(RecordError::Hex(format!(
            "invalid digit {:?}",
            char::from(other)
        ))),
    }
}

/// `#[serde(with = "hex::array")]` for `[u8; N]` fields.
pub mod array {
    use super::*;

    pub fn serialize<S: Serializer, const N: usize>(
        value: &[u8; N],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> std::result::Result<[u8; N], D::Error> {
        let text = String::deserialize(deserializer)?;
        decode_array(&text).map_err(de::Error::custom)
    }
}

/// `#[serde(with = "hex::array_list")]` for `Vec<[u8; N]>` fields.
pub mod array_list {
    use serde::ser::SerializeSeq;

    use super::*;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer, const N: usize>(
        value: &Vec<[u8; N]>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> std::result::Result<Vec<[u8; N]>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|text| decode_array(text).map_err(de::Error::custom))
            .collect()
    }
}

/// `#[serde(with = "hex::bytes")]` for `Vec<u8>` fields.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &[u8],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(de::Error::custom)
    }
}
