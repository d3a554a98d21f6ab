/// Errors that can occur while decoding a record.
///
/// Encoding has no error type: a buffer sized by the layout planner cannot
/// be too small, and writing past its end is a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer cannot hold the record's fixed (stack) region.
    #[error("buffer too small ({available} bytes available, {needed} needed)")]
    BufferTooSmall { needed: usize, available: usize },

    /// A variable-length field's descriptor points outside the heap region.
    #[error(
        "descriptor out of bounds (offset {offset}, {len} bytes, heap starts at {heap_start}, buffer is {buf_len} bytes)"
    )]
    DescriptorOutOfBounds {
        offset: u32,
        len: u64,
        heap_start: u32,
        buf_len: usize,
    },

    /// An enum field holds a value with no declared variant.
    #[error("invalid {ty} discriminant {value}")]
    InvalidDiscriminant { ty: &'static str, value: i128 },

    /// A bool field holds something other than 0 or 1.
    #[error("invalid bool byte {value:#04x}")]
    InvalidBool { value: u8 },

    /// A string field is not valid UTF-8.
    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: u32 },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
