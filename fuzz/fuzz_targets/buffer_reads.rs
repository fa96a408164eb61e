#![no_main]

use arbitrary::Arbitrary;
use bebu_buffer::Buffer;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    U8,
    I16,
    U32,
    I64,
    Rune,
    String,
    Bytes(u8),
    Width,
    LengthTag,
}

#[derive(Debug, Arbitrary)]
struct Input {
    ops: Vec<Op>,
    data: Vec<u8>,
}

// Fuzz target: arbitrary read sequences over an arbitrary Buffer.
//
// Checks the consuming invariant: a successful fixed-width read removes
// exactly its width, a failed fixed-width or sized read removes nothing.
fuzz_target!(|input: Input| {
    let mut buffer = Buffer::from_bytes(&input.data);

    for op in input.ops {
        let before = buffer.len();
        let (ok, fixed) = match op {
            Op::U8 => (buffer.read_u8().is_ok(), Some(1)),
            Op::I16 => (buffer.read_i16().is_ok(), Some(2)),
            Op::U32 => (buffer.read_u32().is_ok(), Some(4)),
            Op::I64 => (buffer.read_i64().is_ok(), Some(8)),
            Op::Rune => (buffer.read_rune().is_ok(), Some(4)),
            Op::Bytes(n) => (buffer.read_bytes(usize::from(n)).is_ok(), Some(usize::from(n))),
            Op::String => (buffer.read_string().is_ok(), None),
            Op::Width => (buffer.read_width().is_ok(), None),
            Op::LengthTag => (buffer.read_length_tag().is_ok(), None),
        };

        match (ok, fixed) {
            (true, Some(width)) => assert_eq!(buffer.len(), before - width),
            (false, Some(_)) => assert_eq!(buffer.len(), before),
            _ => assert!(buffer.len() <= before),
        }
    }
});
