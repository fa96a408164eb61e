/// Options for [`load_whole_value_with`](crate::file::load_whole_value_with).
///
/// ```text
/// ┌────────────────┬─────────┬─────────────────────────────────────────┐
/// │ Field          │ Default │ Effect when true                        │
/// ├────────────────┼─────────┼─────────────────────────────────────────┤
/// │ allow_empty    │ false   │ a zero-byte file is handed to unmarshal │
/// │ allow_trailing │ false   │ unconsumed bytes after unmarshal are OK │
/// └────────────────┴─────────┴─────────────────────────────────────────┘
/// ```
///
/// The defaults make a whole-file load strict: the file must contain
/// exactly one value and nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accept a file with no content instead of failing with
    /// [`BufferError::EmptyFile`](crate::BufferError::EmptyFile).
    pub allow_empty: bool,

    /// Accept bytes left over after the target finished unmarshalling
    /// instead of failing with
    /// [`BufferError::TrailingData`](crate::BufferError::TrailingData).
    pub allow_trailing: bool,
}

impl LoadOptions {
    /// Strict options, same as `LoadOptions::default()`.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Accept leftover bytes, e.g. when a file carries a value followed
    /// by data another component reads.
    #[must_use]
    pub fn allow_trailing(mut self) -> Self {
        self.allow_trailing = true;
        self
    }

    /// Accept empty files.
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}
