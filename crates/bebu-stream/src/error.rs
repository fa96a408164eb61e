use bebu_wire::WireError;

/// Errors that can occur while reading from or writing to a wrapped
/// stream.
///
/// Error hierarchy:
///
/// ```text
///   StreamError
///   ├── Wire(WireError)     ← decode of bytes already taken from the stream
///   ├── Io(io::Error)       ← the underlying stream failed
///   ├── ShortRead           ← stream hit end before the requested count
///   ├── ShortWrite          ← stream stopped accepting bytes
///   ├── DelimiterNotFound   ← stream ended before the stop byte
///   ├── UnsupportedType     ← object dispatch found no matching contract
///   ├── NotCloseable        ← close() on a stream without close support
///   └── Custom              ← a user stream contract reported failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stream reported end of data after `actual` of `expected`
    /// bytes. The bytes that did arrive are counted.
    #[error("short read: got {actual} of {expected} bytes")]
    ShortRead { expected: usize, actual: usize },

    #[error("short write: wrote {actual} of {expected} bytes")]
    ShortWrite { expected: usize, actual: usize },

    /// End of stream before `stop` was seen; `taken` bytes were consumed
    /// and handed back in the caller's buffer.
    #[error("stop byte {stop:#04x} not found after {taken} bytes")]
    DelimiterNotFound { stop: u8, taken: usize },

    #[error("unsupported type {type_name}: no stream contract matches")]
    UnsupportedType { type_name: &'static str },

    #[error("stream does not support close")]
    NotCloseable,

    #[error(transparent)]
    Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Wrap an arbitrary error raised inside a user stream contract.
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }
}
