//! The typed surface shared by every stream reader and writer.
//!
//! Both traits are object-safe so contract implementations receive
//! `&mut dyn BinaryRead` / `&mut dyn BinaryWrite` and stay independent of
//! the concrete stream type. Implementors supply the raw transfer
//! (`read_into`, `read_until`, `write_bytes`) and object dispatch; the
//! typed methods are provided on top and decode through the primitive
//! codec.

use bebu_wire::{Rune, WireError};
use bebu_wire::primitive::{
    self, I8_SIZE, I16_SIZE, I32_SIZE, I64_SIZE, RUNE_SIZE, STRING_TERMINATOR, U8_SIZE,
    U16_SIZE, U32_SIZE, U64_SIZE,
};

use crate::contract::{ReadTarget, WriteSource};
use crate::error::StreamError;

/// Read exactly `N` bytes into an array.
fn read_array<const N: usize>(
    reader: &mut (impl BinaryRead + ?Sized),
) -> Result<[u8; N], StreamError> {
    let mut bytes = [0u8; N];
    reader.read_into(&mut bytes)?;
    Ok(bytes)
}

/// Typed reads from a byte stream.
pub trait BinaryRead {
    /// Fill `buf` completely.
    ///
    /// # Errors
    ///
    /// - [`StreamError::ShortRead`] if the stream ends first. Bytes
    ///   that did arrive are counted but not returned.
    /// - [`StreamError::Io`] if the stream fails.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError>;

    /// Append bytes to `buf` up to and including the first `stop`.
    ///
    /// Returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// [`StreamError::DelimiterNotFound`] if the stream ends before
    /// `stop`; the partial run stays in `buf`.
    fn read_until(&mut self, stop: u8, buf: &mut Vec<u8>) -> Result<usize, StreamError>;

    /// Fill `target` using the first stream contract it supports.
    ///
    /// Returns the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// [`StreamError::UnsupportedType`] if `target` advertises nothing,
    /// else whatever the chosen contract reports.
    fn read_object(&mut self, target: &mut dyn ReadTarget) -> Result<u64, StreamError>;

    fn read_u8(&mut self) -> Result<u8, StreamError> {
        Ok(primitive::decode_u8(&read_array::<U8_SIZE>(self)?)?)
    }

    fn read_i8(&mut self) -> Result<i8, StreamError> {
        Ok(primitive::decode_i8(&read_array::<I8_SIZE>(self)?)?)
    }

    fn read_u16(&mut self) -> Result<u16, StreamError> {
        Ok(primitive::decode_u16(&read_array::<U16_SIZE>(self)?)?)
    }

    fn read_i16(&mut self) -> Result<i16, StreamError> {
        Ok(primitive::decode_i16(&read_array::<I16_SIZE>(self)?)?)
    }

    fn read_u32(&mut self) -> Result<u32, StreamError> {
        Ok(primitive::decode_u32(&read_array::<U32_SIZE>(self)?)?)
    }

    fn read_i32(&mut self) -> Result<i32, StreamError> {
        Ok(primitive::decode_i32(&read_array::<I32_SIZE>(self)?)?)
    }

    fn read_u64(&mut self) -> Result<u64, StreamError> {
        Ok(primitive::decode_u64(&read_array::<U64_SIZE>(self)?)?)
    }

    fn read_i64(&mut self) -> Result<i64, StreamError> {
        Ok(primitive::decode_i64(&read_array::<I64_SIZE>(self)?)?)
    }

    /// Platform-sized unsigned integer, carried as 64 bits.
    ///
    /// # Errors
    ///
    /// As for [`read_into`](Self::read_into), plus [`StreamError::Custom`]
    /// if the value does not fit in `usize`.
    fn read_uint(&mut self) -> Result<usize, StreamError> {
        usize::try_from(self.read_u64()?).map_err(StreamError::custom)
    }

    /// Platform-sized signed integer, carried as 64 bits.
    ///
    /// # Errors
    ///
    /// As for [`read_uint`](Self::read_uint).
    fn read_int(&mut self) -> Result<isize, StreamError> {
        isize::try_from(self.read_i64()?).map_err(StreamError::custom)
    }

    /// Any 32-bit value is a valid rune.
    fn read_rune(&mut self) -> Result<Rune, StreamError> {
        Ok(primitive::decode_rune(&read_array::<RUNE_SIZE>(self)?)?)
    }

    /// Read zero-terminated bytes, stopping at the first `0x00`. The
    /// content is returned as-is, without the terminator.
    ///
    /// # Errors
    ///
    /// [`WireError::MissingTerminator`] if the stream ends before a
    /// terminator.
    fn read_bytes_z(&mut self) -> Result<Vec<u8>, StreamError> {
        let mut run = Vec::new();
        match self.read_until(STRING_TERMINATOR, &mut run) {
            Ok(_) => Ok(primitive::decode_string_bytes(&run)?),
            Err(StreamError::DelimiterNotFound { .. }) => Err(WireError::MissingTerminator.into()),
            Err(e) => Err(e),
        }
    }

    /// Read a zero-terminated UTF-8 string.
    ///
    /// # Errors
    ///
    /// As for [`read_bytes_z`](Self::read_bytes_z), plus
    /// [`WireError::InvalidUtf8`] for non-UTF-8 content.
    fn read_string_z(&mut self) -> Result<String, StreamError> {
        let run = self.read_bytes_z()?;
        Ok(String::from_utf8(run).map_err(WireError::from)?)
    }

    /// Read exactly `n` raw bytes.
    ///
    /// # Errors
    ///
    /// See [`read_into`](Self::read_into).
    fn read_bytes_count(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        let mut bytes = vec![0u8; n];
        self.read_into(&mut bytes)?;
        Ok(bytes)
    }

    /// Read exactly `n` bytes and return them as lowercase hex.
    ///
    /// # Errors
    ///
    /// See [`read_into`](Self::read_into).
    fn read_hex(&mut self, n: usize) -> Result<String, StreamError> {
        Ok(hex::encode(self.read_bytes_count(n)?))
    }
}

/// Typed writes to a byte stream.
///
/// Every write returns the number of bytes produced.
pub trait BinaryWrite {
    /// Write all of `data`, unframed.
    ///
    /// # Errors
    ///
    /// - [`StreamError::ShortWrite`] if the stream stops accepting bytes.
    ///   Bytes that were accepted are counted.
    /// - [`StreamError::Io`] if the stream fails.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, StreamError>;

    /// Write `value` using the first stream contract it supports.
    ///
    /// # Errors
    ///
    /// [`StreamError::UnsupportedType`] if `value` advertises nothing,
    /// else whatever the chosen contract reports.
    fn write_object(&mut self, value: &dyn WriteSource) -> Result<u64, StreamError>;

    fn write_u8(&mut self, value: u8) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_u8(value))
    }

    fn write_i8(&mut self, value: i8) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_i8(value))
    }

    fn write_u16(&mut self, value: u16) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_u16(value))
    }

    fn write_i16(&mut self, value: i16) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_i16(value))
    }

    fn write_u32(&mut self, value: u32) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_u32(value))
    }

    fn write_i32(&mut self, value: i32) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_i32(value))
    }

    fn write_u64(&mut self, value: u64) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_u64(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_i64(value))
    }

    /// Platform-sized unsigned integer, carried as 64 bits.
    ///
    /// # Errors
    ///
    /// As for [`write_bytes`](Self::write_bytes), plus
    /// [`StreamError::Custom`] if the value does not fit in 64 bits.
    fn write_uint(&mut self, value: usize) -> Result<usize, StreamError> {
        let wide = u64::try_from(value).map_err(StreamError::custom)?;
        self.write_u64(wide)
    }

    /// Platform-sized signed integer, carried as 64 bits.
    ///
    /// # Errors
    ///
    /// As for [`write_uint`](Self::write_uint).
    fn write_int(&mut self, value: isize) -> Result<usize, StreamError> {
        let wide = i64::try_from(value).map_err(StreamError::custom)?;
        self.write_i64(wide)
    }

    fn write_rune(&mut self, value: Rune) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_rune(value))
    }

    /// Write raw `value` followed by a `0x00` terminator.
    fn write_bytes_z(&mut self, value: &[u8]) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_string_bytes(value))
    }

    /// Write `value` followed by a `0x00` terminator.
    fn write_string_z(&mut self, value: &str) -> Result<usize, StreamError> {
        self.write_bytes(&primitive::encode_string(value))
    }

    /// Decode hex text (either case) and write the bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::MalformedHex`] before anything is written.
    fn write_hex(&mut self, text: &str) -> Result<usize, StreamError> {
        let data = hex::decode(text).map_err(WireError::from)?;
        self.write_bytes(&data)
    }
}
