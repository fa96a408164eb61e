use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::binary::BinaryWrite;
use crate::close::Close;
use crate::contract::WriteSource;
use crate::counter::ByteCounter;
use crate::dispatch;
use crate::error::StreamError;

type NativeClose<W> = fn(&mut W) -> io::Result<()>;

/// Typed writer over any byte stream, counting every byte it hands off.
///
/// The mirror of [`BinaryReader`](crate::BinaryReader): build with
/// [`new`](Self::new) for any `Write`, [`closing`](Self::closing) for a
/// stream that supports [`Close`], or [`create_file`](Self::create_file).
pub struct BinaryWriter<W> {
    inner: W,
    counter: Arc<ByteCounter>,
    native_close: Option<NativeClose<W>>,
}

impl<W: Write> BinaryWriter<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            counter: Arc::new(ByteCounter::new()),
            native_close: None,
        }
    }

    /// Bytes written since creation or the last [`reset_count`](Self::reset_count).
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
    /// - [`StreamError::NotCloseable`] if the writer was built without
    ///   close support.
    /// - [`StreamError::Io`] if flushing or closing fails.
    pub fn close(&mut self) -> Result<(), StreamError> {
        let close = self.native_close.ok_or(StreamError::NotCloseable)?;
        close(&mut self.inner)?;
        log::debug!("closed writer after {} bytes", self.counter.get());
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writes through this reference bypass the counter.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Close> BinaryWriter<W> {
    /// Wrap a stream that supports [`Close`].
    #[must_use]
    pub fn closing(inner: W) -> Self {
        Self::new(inner).with_close()
    }

    /// Enable [`close`](Self::close) on an already built writer.
    #[must_use]
    pub fn with_close(mut self) -> Self {
        self.native_close = Some(<W as Close>::close as NativeClose<W>);
        self
    }
}

impl BinaryWriter<BufWriter<File>> {
    /// Create (or truncate) `path` for writing.
    ///
    /// The path is resolved to an absolute path first. Buffered data
    /// reaches the file on [`close`](Self::close) or when the writer is
    /// dropped; only `close` reports a failure.
    ///
    /// # Errors
    ///
    /// [`StreamError::Io`] if the path cannot be resolved or created.
    pub fn create_file(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = std::path::absolute(path)?;
        let file = File::create(&path)?;
        log::debug!("created {} for writing", path.display());
        Ok(Self::closing(BufWriter::new(file)))
    }
}

/// Raw writes pass through and are counted.
impl<W: Write> Write for BinaryWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.counter.add(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> BinaryWrite for BinaryWriter<W> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        let n = self.write(data)?;
        if n != data.len() {
            return Err(StreamError::ShortWrite {
                expected: data.len(),
                actual: n,
            });
        }
        Ok(n)
    }

    fn write_object(&mut self, value: &dyn WriteSource) -> Result<u64, StreamError> {
        dispatch::write_object(self, value)
    }
}

#[cfg(test)]
mod tests {
    use bebu_wire::{Rune, WidthClass, WireError};

    use super::*;
    use crate::contract::{
        BinaryInt16, BinaryRune, BinaryString, BinaryUint32, BinaryWriteTo, WriteTo,
    };

    /// Accepts at most `room` bytes in total, then reports zero.
    struct Cramped {
        data: Vec<u8>,
        room: usize,
    }

    impl Write for Cramped {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.room - self.data.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts at most `chunk` bytes per call, without limit overall.
    struct Narrow {
        data: Vec<u8>,
        chunk: usize,
    }

    impl Write for Narrow {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.chunk);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Version(u16, u16);

    impl BinaryWriteTo for Version {
        fn binary_write_to(&self, writer: &mut dyn BinaryWrite) -> Result<u64, StreamError> {
            let n = writer.write_u16(self.0)? + writer.write_u16(self.1)?;
            Ok(n as u64)
        }
    }

    impl WriteSource for Version {
        fn as_binary_write_to(&self) -> Option<&dyn BinaryWriteTo> {
            Some(self)
        }
    }

    struct Raw(&'static [u8]);

    impl WriteTo for Raw {
        fn write_to(&self, writer: &mut dyn Write) -> io::Result<u64> {
            writer.write_all(self.0)?;
            Ok(self.0.len() as u64)
        }
    }

    impl WriteSource for Raw {
        fn as_write_to(&self) -> Option<&dyn WriteTo> {
            Some(self)
        }
    }

    /// Offers several scalar forms; the earliest in the family wins.
    struct Many;

    impl BinaryUint32 for Many {
        fn binary_uint32(&self) -> u32 {
            0xAABB_CCDD
        }
    }

    impl BinaryInt16 for Many {
        fn binary_int16(&self) -> i16 {
            -1
        }
    }

    impl BinaryString for Many {
        fn binary_string(&self) -> String {
            "many".into()
        }
    }

    impl WriteSource for Many {
        fn as_binary_uint32(&self) -> Option<&dyn BinaryUint32> {
            Some(self)
        }

        fn as_binary_int16(&self) -> Option<&dyn BinaryInt16> {
            Some(self)
        }

        fn as_binary_string(&self) -> Option<&dyn BinaryString> {
            Some(self)
        }
    }

    struct Letter(char);

    impl BinaryRune for Letter {
        fn binary_rune(&self) -> Rune {
            Rune::from(self.0)
        }
    }

    impl WriteSource for Letter {
        fn as_binary_rune(&self) -> Option<&dyn BinaryRune> {
            Some(self)
        }
    }

    struct Opaque;

    impl WriteSource for Opaque {}

    fn writer() -> BinaryWriter<Vec<u8>> {
        BinaryWriter::new(Vec::new())
    }

    #[test]
    fn typed_writes_count_bytes() {
        let mut writer = writer();
        assert_eq!(writer.write_u8(0xFF).unwrap(), 1);
        assert_eq!(writer.write_i16(-2).unwrap(), 2);
        assert_eq!(writer.write_u32(4_294_967_295).unwrap(), 4);
        assert_eq!(writer.write_i64(1).unwrap(), 8);
        assert_eq!(writer.write_rune(Rune::from('A')).unwrap(), 4);
        assert_eq!(writer.write_string_z("test").unwrap(), 5);
        assert_eq!(writer.bytes_transferred(), 24);
        assert_eq!(
            hex::encode(writer.get_ref()),
            concat!("ff", "fffe", "ffffffff", "0000000000000001", "00000041", "7465737400")
        );
    }

    #[test]
    fn write_hex_validates_first() {
        let mut writer = writer();
        assert_eq!(writer.write_hex("CAFE").unwrap(), 2);
        let result = writer.write_hex("746573740");
        assert!(matches!(
            result,
            Err(StreamError::Wire(WireError::MalformedHex(_)))
        ));
        assert_eq!(writer.get_ref(), &vec![0xCA, 0xFE]);
        assert_eq!(writer.bytes_transferred(), 2);
    }

    #[test]
    fn short_write_reports_counts() {
        let mut writer = BinaryWriter::new(Cramped {
            data: Vec::new(),
            room: 3,
        });
        let result = writer.write_u64(1);
        assert!(matches!(
            result,
            Err(StreamError::ShortWrite {
                expected: 8,
                actual: 3
            })
        ));
        assert_eq!(writer.bytes_transferred(), 3);
    }

    #[test]
    fn partial_write_is_not_retried() {
        let mut writer = BinaryWriter::new(Narrow {
            data: Vec::new(),
            chunk: 3,
        });
        let result = writer.write_u64(1);
        assert!(matches!(
            result,
            Err(StreamError::ShortWrite {
                expected: 8,
                actual: 3
            })
        ));
        assert_eq!(writer.bytes_transferred(), 3);
        assert_eq!(writer.get_ref().data, vec![0, 0, 0]);

        // Values that fit in one call go through whole
        assert_eq!(writer.write_u16(0x0102).unwrap(), 2);
        assert_eq!(writer.bytes_transferred(), 5);
    }

    #[test]
    fn reset_keeps_output() {
        let mut writer = writer();
        writer.write_u16(1).unwrap();
        writer.reset_count();
        writer.write_u16(2).unwrap();
        assert_eq!(writer.bytes_transferred(), 2);
        assert_eq!(writer.into_inner(), vec![0, 1, 0, 2]);
    }

    #[test]
    fn write_object_builtins() {
        let mut writer = writer();
        assert_eq!(writer.write_object(&7u8).unwrap(), 1);
        assert_eq!(writer.write_object(&-1i32).unwrap(), 4);
        assert_eq!(writer.write_object(&"hi").unwrap(), 3);
        assert_eq!(writer.write_object(&String::from("yo")).unwrap(), 3);
        assert_eq!(writer.write_object(&vec![0xAAu8, 0xBB]).unwrap(), 2);
        assert_eq!(writer.write_object(&Box::new(0x0102u16)).unwrap(), 2);
        assert_eq!(writer.bytes_transferred(), 15);
        assert_eq!(
            hex::encode(writer.get_ref()),
            "07ffffffff686900796f00aabb0102"
        );
    }

    #[test]
    fn platform_ints_and_raw_strings() {
        let mut writer = writer();
        assert_eq!(writer.write_object(&257usize).unwrap(), 8);
        assert_eq!(writer.write_object(&-2isize).unwrap(), 8);
        assert_eq!(writer.write_uint(1).unwrap(), 8);
        assert_eq!(writer.write_bytes_z(&[0x63, 0x61, 0x66, 0xE9]).unwrap(), 5);
        assert_eq!(writer.write_rune(Rune(-1)).unwrap(), 4);
        assert_eq!(writer.bytes_transferred(), 33);
        assert_eq!(
            hex::encode(writer.get_ref()),
            concat!(
                "0000000000000101",
                "fffffffffffffffe",
                "0000000000000001",
                "636166e900",
                "ffffffff"
            )
        );
    }

    #[test]
    fn write_object_contracts() {
        let mut writer = writer();
        assert_eq!(writer.write_object(&Version(1, 2)).unwrap(), 4);
        assert_eq!(writer.write_object(&Raw(b"\x09\x08")).unwrap(), 2);
        // Counted once, at the stream
        assert_eq!(writer.bytes_transferred(), 6);
        assert_eq!(hex::encode(writer.get_ref()), "000100020908");
    }

    #[test]
    fn scalar_family_order() {
        let mut writer = writer();
        writer.write_object(&Many).unwrap();
        writer.write_object(&Letter('z')).unwrap();
        writer.write_object(&WidthClass::Bits16).unwrap();
        assert_eq!(hex::encode(writer.get_ref()), "aabbccdd0000007a10");
    }

    #[test]
    fn write_object_unsupported() {
        let mut writer = writer();
        let result = writer.write_object(&Opaque);
        match result {
            Err(StreamError::UnsupportedType { type_name }) => {
                assert!(type_name.ends_with("Opaque"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
        assert!(writer.get_ref().is_empty());
    }

    #[test]
    fn close_requires_capability() {
        let mut writer = writer();
        assert!(matches!(writer.close(), Err(StreamError::NotCloseable)));
    }

    #[test]
    fn create_file_writes_on_close() {
        let dir = tempdir::TempDir::new("bebu_writer").unwrap();
        let path = dir.path().join("out.bin");

        let mut writer = BinaryWriter::create_file(&path).unwrap();
        writer.write_u16(42).unwrap();
        writer.write_string_z("name").unwrap();
        writer.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x00\x2Aname\0");
        assert_eq!(writer.bytes_transferred(), 7);
    }
}
