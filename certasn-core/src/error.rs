use thiserror::Error;

/// Main error type for certasn codec operations
///
/// One variant per observable failure class. Inner helpers construct the
/// error and unwind with `?`; the public entry point is the only error
/// boundary, so no variant is ever remapped on the way out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A required argument is missing or has the wrong shape for the
    /// requested structure.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Object identifier text that is not dotted-decimal with at least two
    /// components.
    #[error("invalid object identifier: {0}")]
    InvalidOid(String),

    /// The caller's output buffer is too small. `required` is the size the
    /// encoding needs; retrying with a buffer of that size succeeds.
    #[error("output buffer too small, {required} bytes required")]
    MoreData { required: usize },

    /// The encoded element does not start with the expected tag.
    #[error("unexpected tag 0x{found:02x}")]
    BadTag { found: u8 },

    /// The input ends before the encoded element does.
    #[error("unexpected end of encoded data")]
    UnexpectedEnd,

    /// The encoding is malformed beyond repair.
    #[error("corrupt encoding: {0}")]
    Corrupt(&'static str),

    /// A length field needs more than four octets, or an integer encoding
    /// is wider than the target type.
    #[error("encoded value too large: {0}")]
    TooLarge(&'static str),

    /// The value cannot be represented in the requested encoding.
    #[error("value cannot be encoded: {0}")]
    BadEncode(&'static str),

    /// No built-in codec matches the structure identifier and no external
    /// provider is registered for it.
    #[error("no codec available for {0}")]
    CodecNotFound(String),

    /// Internal inconsistency; indicates a bug in the codec itself.
    #[error("internal codec error: {0}")]
    Internal(&'static str),
}

/// Result type alias for certasn codec operations
pub type CodecResult<T> = Result<T, CodecError>;
