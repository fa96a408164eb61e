#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use bebu_buffer::Buffer;
use bebu_stream::{BinaryRead, BinaryReader, BinaryWrite, BinaryWriter};
use bebu_wire::Rune;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Value {
    U8(u8),
    I16(i16),
    U32(u32),
    I64(i64),
    Rune(i32),
    Text(String),
}

// Fuzz target: values written through a stream, read back through both
// a Buffer and a stream reader.
//
// Strings containing 0x00 are skipped: the terminator would split them.
fuzz_target!(|values: Vec<Value>| {
    let values: Vec<Value> = values
        .into_iter()
        .filter(|v| !matches!(v, Value::Text(s) if s.contains('\0')))
        .collect();

    let mut writer = BinaryWriter::new(Vec::new());
    for value in &values {
        match value {
            Value::U8(v) => writer.write_u8(*v),
            Value::I16(v) => writer.write_i16(*v),
            Value::U32(v) => writer.write_u32(*v),
            Value::I64(v) => writer.write_i64(*v),
            Value::Rune(v) => writer.write_rune(Rune(*v)),
            Value::Text(v) => writer.write_string_z(v),
        }
        .unwrap();
    }
    let bytes = writer.into_inner();

    let mut buffer = Buffer::from_bytes(&bytes);
    for value in &values {
        match value {
            Value::U8(v) => assert_eq!(buffer.read_u8().unwrap(), *v),
            Value::I16(v) => assert_eq!(buffer.read_i16().unwrap(), *v),
            Value::U32(v) => assert_eq!(buffer.read_u32().unwrap(), *v),
            Value::I64(v) => assert_eq!(buffer.read_i64().unwrap(), *v),
            Value::Rune(v) => assert_eq!(buffer.read_rune().unwrap(), Rune(*v)),
            Value::Text(v) => assert_eq!(&buffer.read_string().unwrap(), v),
        }
    }
    assert!(buffer.is_empty());

    let mut reader = BinaryReader::new(Cursor::new(bytes.as_slice()));
    for value in &values {
        match value {
            Value::U8(v) => assert_eq!(reader.read_u8().unwrap(), *v),
            Value::I16(v) => assert_eq!(reader.read_i16().unwrap(), *v),
            Value::U32(v) => assert_eq!(reader.read_u32().unwrap(), *v),
            Value::I64(v) => assert_eq!(reader.read_i64().unwrap(), *v),
            Value::Rune(v) => assert_eq!(reader.read_rune().unwrap(), Rune(*v)),
            Value::Text(v) => assert_eq!(&reader.read_string_z().unwrap(), v),
        }
    }
    assert_eq!(reader.bytes_transferred(), bytes.len() as u64);
});
