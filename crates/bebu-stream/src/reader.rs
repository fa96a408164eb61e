use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use std::sync::Arc;

use crate::binary::BinaryRead;
use crate::close::Close;
use crate::contract::ReadTarget;
use crate::counter::ByteCounter;
use crate::dispatch;
use crate::error::StreamError;

type NativeUntil<R> = fn(&mut R, u8, &mut Vec<u8>) -> io::Result<usize>;
type NativeClose<R> = fn(&mut R) -> io::Result<()>;

/// Typed reader over any byte stream, counting every byte it takes.
///
/// Capabilities of the wrapped stream are fixed at construction:
///
/// ```text
/// ┌──────────────────────┬────────────────────┬─────────────────────────┐
/// │ Constructor          │ Bound              │ Gains                   │
/// ├──────────────────────┼────────────────────┼─────────────────────────┤
/// │ new(r)               │ R: Read            │ typed reads             │
/// │ buffered(r)          │ R: BufRead         │ native delimited reads  │
/// │ closing(r)           │ R: Read + Close    │ close()                 │
/// │ open_file(path)      │ (file)             │ both of the above       │
/// └──────────────────────┴────────────────────┴─────────────────────────┘
/// ```
///
/// Without native delimited reads, [`read_until`](BinaryRead::read_until)
/// falls back to pulling one byte at a time. Without close support,
/// [`close`](Self::close) fails with [`StreamError::NotCloseable`].
///
/// The reader itself is single-owner. Only the counter, obtained through
/// [`counter`](Self::counter), may be shared with other threads.
pub struct BinaryReader<R> {
    inner: R,
    counter: Arc<ByteCounter>,
    native_until: Option<NativeUntil<R>>,
    native_close: Option<NativeClose<R>>,
}

impl<R: Read> BinaryReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            counter: Arc::new(ByteCounter::new()),
            native_until: None,
            native_close: None,
        }
    }

    /// Bytes taken since creation or the last [`reset_count`](Self::reset_count).
    #[must_use]
    pub fn bytes_transferred(&self) -> u64 {
        self.counter.get()
    }

    pub fn reset_count(&self) {
        self.counter.reset();
    }

    /// Shared handle to the byte counter.
    #[must_use]
    pub fn counter(&self) -> Arc<ByteCounter> {
        Arc::clone(&self.counter)
    }

    /// Close the wrapped stream.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotCloseable`] if the reader was built without
    ///   close support.
    /// - [`StreamError::Io`] if the stream's close fails.
    pub fn close(&mut self) -> Result<(), StreamError> {
        let close = self.native_close.ok_or(StreamError::NotCloseable)?;
        close(&mut self.inner)?;
        log::debug!("closed reader after {} bytes", self.counter.get());
        Ok(())
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Reads through this reference bypass the counter.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> BinaryReader<R> {
    /// Wrap a buffered stream; delimited reads go straight to
    /// [`BufRead::read_until`].
    #[must_use]
    pub fn buffered(inner: R) -> Self {
        Self {
            native_until: Some(<R as BufRead>::read_until as NativeUntil<R>),
            ..Self::new(inner)
        }
    }
}

impl<R: Read + Close> BinaryReader<R> {
    /// Wrap a stream that supports [`Close`].
    #[must_use]
    pub fn closing(inner: R) -> Self {
        Self::new(inner).with_close()
    }

    /// Enable [`close`](Self::close) on an already built reader.
    #[must_use]
    pub fn with_close(mut self) -> Self {
        self.native_close = Some(<R as Close>::close as NativeClose<R>);
        self
    }
}

impl BinaryReader<BufReader<File>> {
    /// Open `path` for reading.
    ///
    /// The path is resolved to an absolute path first. The file must
    /// exist and be readable.
    ///
    /// # Errors
    ///
    /// [`StreamError::Io`] if the path cannot be resolved or opened.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = std::path::absolute(path)?;
        let file = File::open(&path)?;
        log::debug!("opened {} for reading", path.display());
        Ok(Self::buffered(BufReader::new(file)).with_close())
    }
}

/// Raw reads pass through and are counted.
impl<R: Read> Read for BinaryReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.add(n);
        Ok(n)
    }
}

impl<R: Read> BinaryRead for BinaryReader<R> {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        // One call per value; a partial fill is never topped up
        let n = self.read(buf)?;
        if n != buf.len() {
            return Err(StreamError::ShortRead {
                expected: buf.len(),
                actual: n,
            });
        }
        Ok(())
    }

    fn read_until(&mut self, stop: u8, buf: &mut Vec<u8>) -> Result<usize, StreamError> {
        let start = buf.len();

        if let Some(native) = self.native_until {
            let result = native(&mut self.inner, stop, buf);
            self.counter.add(buf.len() - start);
            result?;
        } else {
            let mut byte = [0u8; 1];
            loop {
                match self.read(&mut byte) {
                    Ok(0) => break,
                    Ok(_) => {
                        buf.push(byte[0]);
                        if byte[0] == stop {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let taken = buf.len() - start;
        if taken == 0 || buf.last() != Some(&stop) {
            return Err(StreamError::DelimiterNotFound { stop, taken });
        }
        Ok(taken)
    }

    fn read_object(&mut self, target: &mut dyn ReadTarget) -> Result<u64, StreamError> {
        dispatch::read_object(self, target)
    }
}
