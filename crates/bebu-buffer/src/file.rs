//! Whole-file glue on top of [`Buffer`].
//!
//! These helpers are thin: resolve an absolute path, move the bytes
//! between the file and a buffer in one call each way, and check the
//! counts. All decoding is
//! done by the value's own contracts.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::buffer::Buffer;
use crate::config::LoadOptions;
use crate::error::BufferError;
use crate::marshal::{BinaryMarshal, BufferUnmarshal};

/// Resolve `path` against the current directory.
fn resolve(path: &Path) -> Result<PathBuf, BufferError> {
    std::path::absolute(path).map_err(|source| BufferError::File {
        op: "resolve",
        path: path.to_path_buf(),
        source,
    })
}

/// Hand `data` to `sink` in one write call.
///
/// Returns the number of bytes written; a partial write is an error,
/// it is not retried.
fn write_once(sink: &mut impl Write, data: &[u8], path: &Path) -> Result<usize, BufferError> {
    let written = sink.write(data).map_err(|source| BufferError::File {
        op: "write",
        path: path.to_path_buf(),
        source,
    })?;
    if written != data.len() {
        return Err(BufferError::ShortWrite {
            expected: data.len(),
            actual: written,
        });
    }
    Ok(written)
}

impl Buffer {
    /// Append the entire content of the file at `path`.
    ///
    /// Existing content is kept; the file's bytes go after it.
    /// Returns the number of bytes loaded.
    ///
    /// # Errors
    ///
    /// - [`BufferError::File`] if the path cannot be resolved, inspected,
    ///   opened or read.
    /// - [`BufferError::ShortRead`] if fewer bytes were read than the
    ///   file's reported size. Nothing is appended in that case.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, BufferError> {
        let path = resolve(path.as_ref())?;
        let file_err = |op| {
            let path = path.clone();
            move |source| BufferError::File { op, path, source }
        };

        let expected = std::fs::metadata(&path).map_err(file_err("stat"))?.len();
        let mut file = File::open(&path).map_err(file_err("open"))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(file_err("read"))?;

        if (data.len() as u64) < expected {
            return Err(BufferError::ShortRead {
                expected: usize::try_from(expected).unwrap_or(usize::MAX),
                actual: data.len(),
            });
        }

        log::debug!("loaded {} bytes from {}", data.len(), path.display());
        Ok(self.write_bytes(&data))
    }

    /// Write the unread content to a newly created (or truncated) file.
    ///
    /// The file is created even when the buffer is empty. The buffer
    /// itself is not consumed. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`BufferError::File`] if the path cannot be resolved or created,
    ///   or a write fails.
    /// - [`BufferError::ShortWrite`] if the file took fewer bytes than
    ///   offered.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<usize, BufferError> {
        let path = resolve(path.as_ref())?;
        let mut file = File::create(&path).map_err(|source| BufferError::File {
            op: "create",
            path: path.clone(),
            source,
        })?;

        let written = write_once(&mut file, &self.bytes(), &path)?;
        log::debug!("saved {written} bytes to {}", path.display());
        Ok(written)
    }
}

/// Marshal `value` and write it as the entire content of `path`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - Whatever [`BinaryMarshal::marshal_binary`] reports.
/// - [`BufferError::File`] / [`BufferError::ShortWrite`] as for
///   [`Buffer::save_to_file`].
pub fn save_whole_value<T: BinaryMarshal + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<usize, BufferError> {
    let path = resolve(path.as_ref())?;
    let mut file = File::create(&path).map_err(|source| BufferError::File {
        op: "create",
        path: path.clone(),
        source,
    })?;

    let data = value.marshal_binary()?;
    let written = write_once(&mut file, &data, &path)?;
    log::debug!("saved whole value ({written} bytes) to {}", path.display());
    Ok(written)
}

/// Load `path` and unmarshal its entire content into `value`, strictly.
///
/// Returns the number of bytes loaded.
///
/// # Errors
///
/// See [`load_whole_value_with`] with [`LoadOptions::default`].
pub fn load_whole_value<T: BufferUnmarshal + ?Sized>(
    path: impl AsRef<Path>,
    value: &mut T,
) -> Result<usize, BufferError> {
    load_whole_value_with(path, value, &LoadOptions::default())
}

/// Load `path` into a fresh buffer and let `value` unmarshal from it.
///
/// # Errors
///
/// - [`BufferError::File`] / [`BufferError::ShortRead`] as for
///   [`Buffer::load_from_file`].
/// - [`BufferError::EmptyFile`] if zero bytes were loaded, unless
///   `options.allow_empty`.
/// - Whatever [`BufferUnmarshal::unmarshal_from_buffer`] reports.
/// - [`BufferError::TrailingData`] if bytes remain after unmarshalling,
///   unless `options.allow_trailing`.
pub fn load_whole_value_with<T: BufferUnmarshal + ?Sized>(
    path: impl AsRef<Path>,
    value: &mut T,
    options: &LoadOptions,
) -> Result<usize, BufferError> {
    let path = path.as_ref();
    let mut buffer = Buffer::new();
    let loaded = buffer.load_from_file(path)?;

    if loaded == 0 && !options.allow_empty {
        return Err(BufferError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    buffer.read_object(value)?;

    let remaining = buffer.len();
    if remaining != 0 {
        if !options.allow_trailing {
            return Err(BufferError::TrailingData {
                consumed: loaded - remaining,
                remaining,
            });
        }
        log::trace!(
            "ignoring {remaining} trailing bytes in {}",
            path.display()
        );
    }

    Ok(loaded)
}
