//! Buffer and stream layers share one wire format.
//!
//! Bytes produced by a `BinaryWriter` must decode through a `Buffer` and
//! vice versa, including user types that implement both sets of
//! contracts (see `bebu_tests::Manifest`).

use std::io::Cursor;

use bebu_buffer::Buffer;
use bebu_stream::{BinaryRead, BinaryReader, BinaryWrite, BinaryWriter, StreamError};
use bebu_tests::Manifest;
use bebu_wire::{Rune, WireError};
use insta::assert_snapshot;

fn stream_bytes(write: impl FnOnce(&mut BinaryWriter<Vec<u8>>)) -> Vec<u8> {
    let mut writer = BinaryWriter::new(Vec::new());
    write(&mut writer);
    writer.into_inner()
}

#[test]
fn primitives_written_by_stream_read_by_buffer() {
    let bytes = stream_bytes(|w| {
        w.write_u16(0xBEEF).unwrap();
        w.write_i32(-5).unwrap();
        w.write_rune(Rune::from('λ')).unwrap();
        w.write_string_z("end").unwrap();
    });
    assert_snapshot!(hex::encode(&bytes), @"beeffffffffb000003bb656e6400");

    let mut buffer = Buffer::from_bytes(&bytes);
    assert_eq!(buffer.read_u16().unwrap(), 0xBEEF);
    assert_eq!(buffer.read_i32().unwrap(), -5);
    assert_eq!(buffer.read_rune().unwrap(), Rune::from('λ'));
    assert_eq!(buffer.read_string().unwrap(), "end");
    assert!(buffer.is_empty());
}

#[test]
fn primitives_written_by_buffer_read_by_stream() {
    let mut buffer = Buffer::new();
    buffer.write_i8(-1);
    buffer.write_u64(42);
    buffer.write_string("é");

    let mut reader = BinaryReader::new(Cursor::new(buffer.bytes()));
    assert_eq!(reader.read_i8().unwrap(), -1);
    assert_eq!(reader.read_u64().unwrap(), 42);
    assert_eq!(reader.read_string_z().unwrap(), "é");
    assert_eq!(reader.bytes_transferred() as usize, buffer.len());
}

#[test]
fn manifest_same_bytes_both_ways() {
    let manifest = Manifest::sample(3);

    let mut buffer = Buffer::new();
    buffer.write(&manifest).unwrap();

    let streamed = stream_bytes(|w| {
        assert_eq!(w.write_object(&manifest).unwrap(), 23);
    });

    assert_eq!(buffer.bytes(), streamed);
    assert_snapshot!(buffer.hex(), @"73616d706c650000030803000000000000000100000002");
}

#[test]
fn manifest_stream_to_buffer() {
    let original = Manifest::sample(300);
    let bytes = stream_bytes(|w| {
        w.write_object(&original).unwrap();
        w.write_u8(0xEE).unwrap();
    });
    // 300 entries need a 16-bit count
    assert_snapshot!(hex::encode(&bytes[..12]), @"73616d706c6500000310012c");

    let mut buffer = Buffer::from(bytes);
    let mut restored = Manifest::default();
    buffer.read(&mut restored).unwrap();
    assert_eq!(restored, original);
    assert_eq!(buffer.read_u8().unwrap(), 0xEE);
}

#[test]
fn manifest_buffer_to_stream() {
    let original = Manifest {
        name: String::new(),
        version: 0,
        entries: Vec::new(),
    };
    let mut buffer = Buffer::new();
    buffer.write_object(&original).unwrap();
    assert_snapshot!(buffer.hex(), @"0000000800");

    let mut reader = BinaryReader::buffered(Cursor::new(buffer.bytes()));
    let mut restored = Manifest::sample(1);
    assert_eq!(reader.read_object(&mut restored).unwrap(), 5);
    assert_eq!(restored, original);
    assert_eq!(reader.bytes_transferred(), 5);
}

#[test]
fn truncated_manifest_fails_on_both_sides() {
    let mut bytes = Buffer::new();
    bytes.write(&Manifest::sample(2)).unwrap();
    let mut bytes = bytes.bytes();
    bytes.truncate(bytes.len() - 1);

    let mut buffer = Buffer::from_bytes(&bytes);
    let err = buffer.read(&mut Manifest::default()).unwrap_err();
    assert!(matches!(
        err,
        bebu_buffer::BufferError::Wire(WireError::InsufficientData {
            available: 3,
            required: 4
        })
    ));

    let mut reader = BinaryReader::new(Cursor::new(bytes));
    let err = reader.read_object(&mut Manifest::default()).unwrap_err();
    assert!(matches!(
        err,
        StreamError::ShortRead {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn hex_roundtrip_across_layers() {
    let bytes = stream_bytes(|w| {
        w.write_hex("00FF10").unwrap();
    });
    let mut buffer = Buffer::from(bytes);
    assert_eq!(buffer.read_hex(3).unwrap(), "00ff10");

    buffer.write_hex("abcdef").unwrap();
    let mut reader = BinaryReader::new(Cursor::new(buffer.bytes()));
    assert_eq!(reader.read_hex(3).unwrap(), "abcdef");
}

#[test]
fn dyn_surface_accepts_any_stream() {
    fn write_pair(writer: &mut dyn BinaryWrite) -> Result<usize, StreamError> {
        Ok(writer.write_u8(1)? + writer.write_u8(2)?)
    }

    let mut buffer = Buffer::new();
    {
        let mut writer = BinaryWriter::new(buffer.io());
        assert_eq!(write_pair(&mut writer).unwrap(), 2);
        assert_eq!(writer.bytes_transferred(), 2);
    }
    assert_eq!(buffer.hex(), "0102");

    // Reading through the adapter consumes the buffer
    let mut reader = BinaryReader::new(buffer.io());
    assert_eq!(reader.read_u16().unwrap(), 0x0102);
    assert!(matches!(
        reader.read_u8(),
        Err(StreamError::ShortRead {
            expected: 1,
            actual: 0
        })
    ));
    drop(reader);
    assert!(buffer.is_empty());
}
