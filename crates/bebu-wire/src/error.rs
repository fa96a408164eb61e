/// Errors raised by the pure wire-level conversions.
///
/// Every higher layer (`bebu-buffer`, `bebu-stream`) wraps this type
/// transparently, so a decode failure deep inside a user type still
/// surfaces with the original kind and sizes.
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ WireError (this crate)                              │
/// │   ├── size errors: InsufficientData, SizeMismatch   │
/// │   ├── text errors: MissingTerminator, InvalidUtf8,  │
/// │   │                MalformedHex                     │
/// │   └── length tag:  NegativeLength, Overflow,        │
/// │                    UnknownWidthMarker               │
/// └─────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes remain than a fixed-width or explicitly sized read needs.
    #[error("insufficient data: only {available} of {required} bytes available")]
    InsufficientData { available: usize, required: usize },

    /// A decode function received a span of the wrong exact length.
    #[error("size mismatch: expected exactly {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The span did not end with the `0x00` terminator, or ran out of bytes
    /// before one was found.
    #[error("missing 0x00 terminator in zero-terminated string")]
    MissingTerminator,

    /// Hex text had an odd digit count or a non-hex character.
    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// Width selection was asked for a negative count.
    #[error("negative length {len}")]
    NegativeLength { len: i128 },

    /// A count or magnitude does not fit the available bit width.
    #[error("overflow: {value} does not fit in {bits} bits")]
    Overflow { value: u128, bits: u32 },

    /// A length tag marker byte was not one of 8, 16, 32 or 64.
    #[error("unknown width marker {marker:#04X}, expected one of 8, 16, 32, 64")]
    UnknownWidthMarker { marker: u8 },

    /// String bytes before the terminator were not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
