use alloc::string::String;

/// Errors from IFF/ILBM decoding and encoding.
///
/// All variants are terminal for a single call; nothing is retried
/// internally. Out-of-range color indices during composition are *not*
/// errors; they are counted on [`crate::DecodedImage::unmapped_pixels`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IlbmError {
    /// Fewer bytes remain than a declared chunk or header length demands.
    #[error("truncated input: {0}")]
    TruncatedInput(String),

    /// The outermost chunk is not a `FORM`.
    #[error("malformed header: outermost chunk is '{0}', expected 'FORM'")]
    MalformedHeader(crate::ChunkId),

    #[error("no BMHD chunk in FORM")]
    MissingHeader,

    #[error("no CMAP chunk in FORM")]
    MissingColorMap,

    #[error("no BODY chunk in FORM")]
    MissingBody,

    /// Form type or compression mode this crate does not handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Pixel body does not match the layout the header declares.
    #[error("body size mismatch: expected {expected} bytes, got {actual}")]
    BodySizeMismatch { expected: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Encoder was handed inconsistent arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
