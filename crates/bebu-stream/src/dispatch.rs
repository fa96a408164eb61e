//! Object dispatch for streams.
//!
//! The priority order lives here and nowhere else:
//!
//! ```text
//!   read_object(target)                 write_object(value)
//!   ───────────────────                 ───────────────────
//!   1. BinaryReadFrom                   1. BinaryWriteTo
//!   2. ReadFrom                         2. WriteTo
//!   3. built-in target                  3. BinaryUint8  .. BinaryUint64
//!                                          BinaryInt8   .. BinaryInt64
//!                                          BinaryRune, BinaryString
//!                                       4. built-in source
//!   otherwise UnsupportedType           otherwise UnsupportedType
//! ```
//!
//! The first hook that returns `Some` wins; later ones are not consulted.
//! Contract return counts are passed through to the caller but are not
//! added to the byte counter, because every byte a contract moves already
//! went through the counting stream.

use std::io;

use bebu_wire::primitive::{
    I8_SIZE, I16_SIZE, I32_SIZE, I64_SIZE, RUNE_SIZE, U8_SIZE, U16_SIZE, U32_SIZE, U64_SIZE,
};

use crate::binary::{BinaryRead, BinaryWrite};
use crate::contract::{BuiltinSource, BuiltinTarget, ReadTarget, WriteSource};
use crate::error::StreamError;

pub(crate) fn read_object<S: BinaryRead + io::Read>(
    stream: &mut S,
    target: &mut dyn ReadTarget,
) -> Result<u64, StreamError> {
    if let Some(contract) = target.as_binary_read_from() {
        return contract.binary_read_from(stream);
    }
    if let Some(contract) = target.as_read_from() {
        return Ok(contract.read_from(stream)?);
    }
    if let Some(builtin) = target.as_builtin_target() {
        return read_builtin(stream, builtin);
    }
    Err(StreamError::UnsupportedType {
        type_name: target.type_name(),
    })
}

fn read_builtin(
    stream: &mut dyn BinaryRead,
    target: BuiltinTarget<'_>,
) -> Result<u64, StreamError> {
    let taken = match target {
        BuiltinTarget::U8(v) => {
            *v = stream.read_u8()?;
            U8_SIZE
        }
        BuiltinTarget::I8(v) => {
            *v = stream.read_i8()?;
            I8_SIZE
        }
        BuiltinTarget::U16(v) => {
            *v = stream.read_u16()?;
            U16_SIZE
        }
        BuiltinTarget::I16(v) => {
            *v = stream.read_i16()?;
            I16_SIZE
        }
        BuiltinTarget::U32(v) => {
            *v = stream.read_u32()?;
            U32_SIZE
        }
        BuiltinTarget::I32(v) => {
            *v = stream.read_i32()?;
            I32_SIZE
        }
        BuiltinTarget::U64(v) => {
            *v = stream.read_u64()?;
            U64_SIZE
        }
        BuiltinTarget::I64(v) => {
            *v = stream.read_i64()?;
            I64_SIZE
        }
        BuiltinTarget::Usize(v) => {
            *v = stream.read_uint()?;
            U64_SIZE
        }
        BuiltinTarget::Isize(v) => {
            *v = stream.read_int()?;
            I64_SIZE
        }
        BuiltinTarget::Rune(v) => {
            *v = stream.read_rune()?;
            RUNE_SIZE
        }
        BuiltinTarget::String(v) => {
            *v = stream.read_string_z()?;
            v.len() + 1
        }
        BuiltinTarget::Bytes(v) => {
            stream.read_into(v)?;
            v.len()
        }
    };
    Ok(taken as u64)
}

pub(crate) fn write_object<S: BinaryWrite + io::Write>(
    stream: &mut S,
    value: &dyn WriteSource,
) -> Result<u64, StreamError> {
    if let Some(contract) = value.as_binary_write_to() {
        return contract.binary_write_to(stream);
    }
    if let Some(contract) = value.as_write_to() {
        return Ok(contract.write_to(stream)?);
    }

    let written = if let Some(scalar) = value.as_binary_uint8() {
        stream.write_u8(scalar.binary_uint8())?
    } else if let Some(scalar) = value.as_binary_uint16() {
        stream.write_u16(scalar.binary_uint16())?
    } else if let Some(scalar) = value.as_binary_uint32() {
        stream.write_u32(scalar.binary_uint32())?
    } else if let Some(scalar) = value.as_binary_uint64() {
        stream.write_u64(scalar.binary_uint64())?
    } else if let Some(scalar) = value.as_binary_int8() {
        stream.write_i8(scalar.binary_int8())?
    } else if let Some(scalar) = value.as_binary_int16() {
        stream.write_i16(scalar.binary_int16())?
    } else if let Some(scalar) = value.as_binary_int32() {
        stream.write_i32(scalar.binary_int32())?
    } else if let Some(scalar) = value.as_binary_int64() {
        stream.write_i64(scalar.binary_int64())?
    } else if let Some(scalar) = value.as_binary_rune() {
        stream.write_rune(scalar.binary_rune())?
    } else if let Some(scalar) = value.as_binary_string() {
        stream.write_string_z(&scalar.binary_string())?
    } else if let Some(builtin) = value.as_builtin_source() {
        write_builtin(stream, builtin)?
    } else {
        return Err(StreamError::UnsupportedType {
            type_name: value.type_name(),
        });
    };
    Ok(written as u64)
}

fn write_builtin(
    stream: &mut dyn BinaryWrite,
    source: BuiltinSource<'_>,
) -> Result<usize, StreamError> {
    match source {
        BuiltinSource::U8(v) => stream.write_u8(v),
        BuiltinSource::I8(v) => stream.write_i8(v),
        BuiltinSource::U16(v) => stream.write_u16(v),
        BuiltinSource::I16(v) => stream.write_i16(v),
        BuiltinSource::U32(v) => stream.write_u32(v),
        BuiltinSource::I32(v) => stream.write_i32(v),
        BuiltinSource::U64(v) => stream.write_u64(v),
        BuiltinSource::I64(v) => stream.write_i64(v),
        BuiltinSource::Usize(v) => stream.write_uint(v),
        BuiltinSource::Isize(v) => stream.write_int(v),
        BuiltinSource::Rune(v) => stream.write_rune(v),
        BuiltinSource::Str(v) => stream.write_string_z(v),
        BuiltinSource::Bytes(v) => stream.write_bytes(v),
    }
}
