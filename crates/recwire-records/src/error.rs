use recwire_codec::DecodeError;
use recwire_frame::FrameError;

/// Errors surfaced by the record registry.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// No record type is registered under the given name.
    #[error("unknown record type: {0}")]
    UnknownRecord(String),

    /// The JSON mirror did not match the record's field set.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The binary buffer could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The framed buffer could not be decoded.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A hex string was malformed.
    #[error("invalid hex: {0}")]
    Hex(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;
