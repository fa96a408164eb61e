//! Stream capability contracts and the hooks object dispatch uses to
//! discover them.
//!
//! A user type opts into [`read_object`](crate::BinaryRead::read_object)
//! or [`write_object`](crate::BinaryWrite::write_object) in two steps:
//! implement one contract, then implement the hook trait
//! ([`ReadTarget`] / [`WriteSource`]) and override the matching `as_*`
//! method to return `Some(self)`. Every hook defaults to `None`, so a type
//! only advertises what it actually supports.
//!
//! ```rust
//! use bebu_stream::{BinaryWrite, BinaryWriteTo, StreamError, WriteSource};
//!
//! struct Version(u16, u16);
//!
//! impl BinaryWriteTo for Version {
//!     fn binary_write_to(&self, writer: &mut dyn BinaryWrite) -> Result<u64, StreamError> {
//!         let n = writer.write_u16(self.0)? + writer.write_u16(self.1)?;
//!         Ok(n as u64)
//!     }
//! }
//!
//! impl WriteSource for Version {
//!     fn as_binary_write_to(&self) -> Option<&dyn BinaryWriteTo> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! Primitives, runes, strings and byte spans are covered here through
//! the `as_builtin_*` hooks; references and boxes forward to what they
//! point at.

use std::io;

use bebu_wire::{Rune, WidthClass};

use crate::binary::{BinaryRead, BinaryWrite};
use crate::error::StreamError;

// ── Contracts ─────────────────────────────────────────────────────────

/// A type that pulls its own bytes from a [`BinaryRead`].
pub trait BinaryReadFrom {
    /// Returns the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Implementation-defined; usually a propagated read error.
    fn binary_read_from(&mut self, reader: &mut dyn BinaryRead) -> Result<u64, StreamError>;
}

/// A type that fills itself from any byte stream.
///
/// Broader and lower priority than [`BinaryReadFrom`].
pub trait ReadFrom {
    /// Returns the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn read_from(&mut self, reader: &mut dyn io::Read) -> io::Result<u64>;
}

/// A type that pushes its own bytes to a [`BinaryWrite`].
pub trait BinaryWriteTo {
    /// Returns the number of bytes produced.
    ///
    /// # Errors
    ///
    /// Implementation-defined; usually a propagated write error.
    fn binary_write_to(&self, writer: &mut dyn BinaryWrite) -> Result<u64, StreamError>;
}

/// A type that writes itself to any byte stream.
///
/// Broader and lower priority than [`BinaryWriteTo`].
pub trait WriteTo {
    /// Returns the number of bytes produced.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn write_to(&self, writer: &mut dyn io::Write) -> io::Result<u64>;
}

// Single-scalar extraction. A type that can stand in for one primitive
// is written as that primitive.

pub trait BinaryUint8 {
    fn binary_uint8(&self) -> u8;
}

pub trait BinaryUint16 {
    fn binary_uint16(&self) -> u16;
}

pub trait BinaryUint32 {
    fn binary_uint32(&self) -> u32;
}

pub trait BinaryUint64 {
    fn binary_uint64(&self) -> u64;
}

pub trait BinaryInt8 {
    fn binary_int8(&self) -> i8;
}

pub trait BinaryInt16 {
    fn binary_int16(&self) -> i16;
}

pub trait BinaryInt32 {
    fn binary_int32(&self) -> i32;
}

pub trait BinaryInt64 {
    fn binary_int64(&self) -> i64;
}

pub trait BinaryRune {
    fn binary_rune(&self) -> Rune;
}

pub trait BinaryString {
    fn binary_string(&self) -> String;
}

// ── Built-in cases ────────────────────────────────────────────────────

/// A built-in read target, borrowed mutably so dispatch can fill it.
#[derive(Debug)]
pub enum BuiltinTarget<'a> {
    U8(&'a mut u8),
    I8(&'a mut i8),
    U16(&'a mut u16),
    I16(&'a mut i16),
    U32(&'a mut u32),
    I32(&'a mut i32),
    U64(&'a mut u64),
    I64(&'a mut i64),
    /// Read as 64 bits.
    Usize(&'a mut usize),
    /// Read as 64 bits.
    Isize(&'a mut isize),
    Rune(&'a mut Rune),
    /// Filled from a zero-terminated string.
    String(&'a mut String),
    /// Filled completely; the slice length is the byte count read.
    Bytes(&'a mut [u8]),
}

/// A built-in write source.
#[derive(Clone, Copy, Debug)]
pub enum BuiltinSource<'a> {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    /// Written as 64 bits.
    Usize(usize),
    /// Written as 64 bits.
    Isize(isize),
    Rune(Rune),
    /// Written with a `0x00` terminator.
    Str(&'a str),
    /// Written unframed.
    Bytes(&'a [u8]),
}

// ── Dispatch hooks ────────────────────────────────────────────────────

/// Anything [`read_object`](crate::BinaryRead::read_object) can fill.
pub trait ReadTarget {
    /// Name reported by [`StreamError::UnsupportedType`].
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_binary_read_from(&mut self) -> Option<&mut dyn BinaryReadFrom> {
        None
    }

    fn as_read_from(&mut self) -> Option<&mut dyn ReadFrom> {
        None
    }

    fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
        None
    }
}

/// Anything [`write_object`](crate::BinaryWrite::write_object) can write.
pub trait WriteSource {
    /// Name reported by [`StreamError::UnsupportedType`].
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_binary_write_to(&self) -> Option<&dyn BinaryWriteTo> {
        None
    }

    fn as_write_to(&self) -> Option<&dyn WriteTo> {
        None
    }

    fn as_binary_uint8(&self) -> Option<&dyn BinaryUint8> {
        None
    }

    fn as_binary_uint16(&self) -> Option<&dyn BinaryUint16> {
        None
    }

    fn as_binary_uint32(&self) -> Option<&dyn BinaryUint32> {
        None
    }

    fn as_binary_uint64(&self) -> Option<&dyn BinaryUint64> {
        None
    }

    fn as_binary_int8(&self) -> Option<&dyn BinaryInt8> {
        None
    }

    fn as_binary_int16(&self) -> Option<&dyn BinaryInt16> {
        None
    }

    fn as_binary_int32(&self) -> Option<&dyn BinaryInt32> {
        None
    }

    fn as_binary_int64(&self) -> Option<&dyn BinaryInt64> {
        None
    }

    fn as_binary_rune(&self) -> Option<&dyn BinaryRune> {
        None
    }

    fn as_binary_string(&self) -> Option<&dyn BinaryString> {
        None
    }

    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        None
    }
}

macro_rules! builtin_scalar {
    ($($ty:ty => $variant:ident;)*) => {
        $(
            impl ReadTarget for $ty {
                fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
                    Some(BuiltinTarget::$variant(self))
                }
            }

            impl WriteSource for $ty {
                fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
                    Some(BuiltinSource::$variant(*self))
                }
            }
        )*
    };
}

builtin_scalar! {
    u8 => U8;
    i8 => I8;
    u16 => U16;
    i16 => I16;
    u32 => U32;
    i32 => I32;
    u64 => U64;
    i64 => I64;
    usize => Usize;
    isize => Isize;
    Rune => Rune;
}

impl ReadTarget for String {
    fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
        Some(BuiltinTarget::String(self))
    }
}

impl WriteSource for String {
    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        Some(BuiltinSource::Str(self))
    }
}

impl WriteSource for str {
    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        Some(BuiltinSource::Str(self))
    }
}

impl ReadTarget for [u8] {
    fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
        Some(BuiltinTarget::Bytes(self))
    }
}

impl WriteSource for [u8] {
    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        Some(BuiltinSource::Bytes(self))
    }
}

impl<const N: usize> ReadTarget for [u8; N] {
    fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
        Some(BuiltinTarget::Bytes(self))
    }
}

impl<const N: usize> WriteSource for [u8; N] {
    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        Some(BuiltinSource::Bytes(self))
    }
}

/// Reading fills the vector's current length; it is not resized.
impl ReadTarget for Vec<u8> {
    fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
        Some(BuiltinTarget::Bytes(self))
    }
}

impl WriteSource for Vec<u8> {
    fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
        Some(BuiltinSource::Bytes(self))
    }
}

// ── Forwarding through references and boxes ───────────────────────────

macro_rules! forward_read_target {
    ($($wrapper:ty),*) => {
        $(
            impl<T: ReadTarget + ?Sized> ReadTarget for $wrapper {
                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn as_binary_read_from(&mut self) -> Option<&mut dyn BinaryReadFrom> {
                    (**self).as_binary_read_from()
                }

                fn as_read_from(&mut self) -> Option<&mut dyn ReadFrom> {
                    (**self).as_read_from()
                }

                fn as_builtin_target(&mut self) -> Option<BuiltinTarget<'_>> {
                    (**self).as_builtin_target()
                }
            }
        )*
    };
}

forward_read_target!(&mut T, Box<T>);

macro_rules! forward_write_source {
    ($($wrapper:ty),*) => {
        $(
            impl<T: WriteSource + ?Sized> WriteSource for $wrapper {
                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn as_binary_write_to(&self) -> Option<&dyn BinaryWriteTo> {
                    (**self).as_binary_write_to()
                }

                fn as_write_to(&self) -> Option<&dyn WriteTo> {
                    (**self).as_write_to()
                }

                fn as_binary_uint8(&self) -> Option<&dyn BinaryUint8> {
                    (**self).as_binary_uint8()
                }

                fn as_binary_uint16(&self) -> Option<&dyn BinaryUint16> {
                    (**self).as_binary_uint16()
                }

                fn as_binary_uint32(&self) -> Option<&dyn BinaryUint32> {
                    (**self).as_binary_uint32()
                }

                fn as_binary_uint64(&self) -> Option<&dyn BinaryUint64> {
                    (**self).as_binary_uint64()
                }

                fn as_binary_int8(&self) -> Option<&dyn BinaryInt8> {
                    (**self).as_binary_int8()
                }

                fn as_binary_int16(&self) -> Option<&dyn BinaryInt16> {
                    (**self).as_binary_int16()
                }

                fn as_binary_int32(&self) -> Option<&dyn BinaryInt32> {
                    (**self).as_binary_int32()
                }

                fn as_binary_int64(&self) -> Option<&dyn BinaryInt64> {
                    (**self).as_binary_int64()
                }

                fn as_binary_rune(&self) -> Option<&dyn BinaryRune> {
                    (**self).as_binary_rune()
                }

                fn as_binary_string(&self) -> Option<&dyn BinaryString> {
                    (**self).as_binary_string()
                }

                fn as_builtin_source(&self) -> Option<BuiltinSource<'_>> {
                    (**self).as_builtin_source()
                }
            }
        )*
    };
}

forward_write_source!(&T, &mut T, Box<T>);

// ── Width markers ─────────────────────────────────────────────────────

/// A width class is written as its one-byte marker.
impl BinaryUint8 for WidthClass {
    fn binary_uint8(&self) -> u8 {
        self.marker()
    }
}

impl WriteSource for WidthClass {
    fn as_binary_uint8(&self) -> Option<&dyn BinaryUint8> {
        Some(self)
    }
}

impl BinaryReadFrom for WidthClass {
    fn binary_read_from(&mut self, reader: &mut dyn BinaryRead) -> Result<u64, StreamError> {
        *self = Self::from_marker(reader.read_u8()?)?;
        Ok(1)
    }
}

impl ReadTarget for WidthClass {
    fn as_binary_read_from(&mut self) -> Option<&mut dyn BinaryReadFrom> {
        Some(self)
    }
}
