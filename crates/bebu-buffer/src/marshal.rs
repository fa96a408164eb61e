//! Capability contracts for Buffer-based (de)serialization.
//!
//! A user type joins Buffer encoding by implementing one of three narrow
//! contracts:
//!
//! ```text
//! ┌──────────────────┬───────────────────────────────────────────────┐
//! │ Contract         │ Meaning                                       │
//! ├──────────────────┼───────────────────────────────────────────────┤
//! │ BinaryMarshal    │ produce the whole serialized form as bytes    │
//! │ BinaryUnmarshal  │ rebuild from an exact, caller-sized byte span │
//! │ BufferUnmarshal  │ consume own bytes from a Buffer, leave rest   │
//! └──────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! [`Buffer::write`] and [`Buffer::read`] dispatch through
//! [`BufferEncode`] / [`BufferDecode`]. Those are implemented directly for
//! every primitive, [`Rune`], strings and byte slices (encoded with the
//! primitive codec), and by blanket impl for every `BinaryMarshal` /
//! `BufferUnmarshal` type. A type therefore has exactly one way to be
//! written and one way to be read through the generic entry points;
//! `BinaryUnmarshal` needs the byte count from the caller and goes
//! through [`Buffer::read_object_bytes`] instead.

use bebu_wire::Rune;

use crate::buffer::Buffer;
use crate::error::BufferError;

/// Whole-value serialization to bytes.
pub trait BinaryMarshal {
    /// Produce the complete serialized form.
    ///
    /// # Errors
    ///
    /// Implementation-defined, typically [`BufferError::Custom`].
    fn marshal_binary(&self) -> Result<Vec<u8>, BufferError>;
}

/// Whole-value deserialization from an exact byte span.
pub trait BinaryUnmarshal {
    /// Rebuild `self` from `data`, which holds exactly this value's bytes.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BufferError>;
}

/// Deserialization that consumes its own bytes from a [`Buffer`].
///
/// Implementations must read only their own bytes and leave anything
/// after them in place for the next reader.
pub trait BufferUnmarshal {
    /// # Errors
    ///
    /// Implementation-defined; usually a propagated Buffer read error.
    fn unmarshal_from_buffer(&mut self, buffer: &mut Buffer) -> Result<(), BufferError>;
}

/// Anything [`Buffer::write`] accepts.
pub trait BufferEncode {
    /// Append `self` to `buffer`, returning the byte count.
    ///
    /// # Errors
    ///
    /// Only marshal contracts can fail; primitives always succeed.
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError>;
}

/// Anything [`Buffer::read`] can fill.
pub trait BufferDecode {
    /// Consume this value's bytes from `buffer` and overwrite `self`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying read reports.
    fn decode_from(&mut self, buffer: &mut Buffer) -> Result<(), BufferError>;
}

impl<T: BinaryMarshal + ?Sized> BufferEncode for T {
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
        buffer.write_object(self)
    }
}

impl<T: BufferUnmarshal + ?Sized> BufferDecode for T {
    fn decode_from(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        buffer.read_object(self)
    }
}

macro_rules! primitive_codec {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl BufferEncode for $ty {
                fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
                    Ok(buffer.$write(*self))
                }
            }

            impl BufferDecode for $ty {
                fn decode_from(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
                    *self = buffer.$read()?;
                    Ok(())
                }
            }
        )*
    };
}

primitive_codec! {
    u8 => write_u8, read_u8;
    i8 => write_i8, read_i8;
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    Rune => write_rune, read_rune;
}

impl BufferEncode for str {
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
        Ok(buffer.write_string(self))
    }
}

impl BufferEncode for String {
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
        Ok(buffer.write_string(self))
    }
}

impl BufferDecode for String {
    fn decode_from(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        *self = buffer.read_string()?;
        Ok(())
    }
}

/// Raw bytes are written unframed; the reader must know the length.
impl BufferEncode for [u8] {
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
        Ok(buffer.write_bytes(self))
    }
}

impl BufferEncode for Vec<u8> {
    fn encode_into(&self, buffer: &mut Buffer) -> Result<usize, BufferError> {
        Ok(buffer.write_bytes(self))
    }
}

/// Fills the whole slice; its length is the byte count read.
impl BufferDecode for [u8] {
    fn decode_from(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        buffer.read_into(self)
    }
}
