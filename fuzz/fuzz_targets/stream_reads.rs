#![no_main]

use std::io::Cursor;

use bebu_stream::{BinaryRead, BinaryReader};
use libfuzzer_sys::fuzz_target;

// Fuzz target: typed reads from a stream until it runs dry.
//
// The byte counter must never exceed the input length, and the bytewise
// and buffered delimited reads must agree on every input.
fuzz_target!(|data: &[u8]| {
    let mut reader = BinaryReader::new(Cursor::new(data));
    while reader.read_string_z().is_ok() {}
    let _ = reader.read_u32();
    assert!(reader.bytes_transferred() <= data.len() as u64);

    let Some((&stop, rest)) = data.split_first() else {
        return;
    };
    let mut plain = BinaryReader::new(Cursor::new(rest));
    let mut buffered = BinaryReader::buffered(Cursor::new(rest));
    let mut a = Vec::new();
    let mut b = Vec::new();
    let ra = plain.read_until(stop, &mut a);
    let rb = buffered.read_until(stop, &mut b);
    assert_eq!(a, b);
    assert_eq!(ra.is_ok(), rb.is_ok());
    assert_eq!(plain.bytes_transferred(), buffered.bytes_transferred());
});
