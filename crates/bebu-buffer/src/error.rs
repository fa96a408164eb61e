use std::path::PathBuf;

use bebu_wire::WireError;

/// Errors that can occur while encoding into or decoding out of a
/// [`Buffer`](crate::Buffer), or while moving a buffer to and from a file.
///
/// Error hierarchy:
///
/// ```text
///   BufferError
///   ├── Wire(WireError)   ← sizes, terminators, hex, length tags
///   ├── ShortRead         ← file yielded fewer bytes than its size
///   ├── ShortWrite        ← sink accepted fewer bytes than offered
///   ├── EmptyFile         ← whole-value load found nothing to decode
///   ├── TrailingData      ← whole-value load left bytes unconsumed
///   ├── File              ← path resolution / open / create failed
///   └── Custom            ← a user marshal contract reported failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("short read: got {actual} of {expected} bytes")]
    ShortRead { expected: usize, actual: usize },

    #[error("short write: wrote {actual} of {expected} bytes")]
    ShortWrite { expected: usize, actual: usize },

    #[error("loaded 0 bytes from {}", .path.display())]
    EmptyFile { path: PathBuf },

    /// The target's unmarshal finished with bytes still in the buffer.
    #[error("trailing data: {consumed} bytes consumed, {remaining} remaining")]
    TrailingData { consumed: usize, remaining: usize },

    #[error("{op} {}: {source}", .path.display())]
    File {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BufferError {
    /// Wrap an arbitrary error raised inside a user marshal contract.
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }
}
