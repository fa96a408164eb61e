use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

/// A stream that can be closed explicitly, reporting any failure.
///
/// Rust streams release their handle on drop and swallow errors there.
/// `Close` is for the streams where an explicit close has something to
/// report: pending data to flush, a descriptor to sync, a connection to
/// shut down.
pub trait Close {
    /// # Errors
    ///
    /// Whatever the stream reports while flushing or shutting down.
    fn close(&mut self) -> io::Result<()>;
}

/// Flushes file data and metadata to disk.
impl Close for File {
    fn close(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl Close for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl<R: Close> Close for BufReader<R> {
    fn close(&mut self) -> io::Result<()> {
        self.get_mut().close()
    }
}

/// Flushes the buffer before closing the inner stream.
impl<W: Write + Close> Close for BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().close()
    }
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
