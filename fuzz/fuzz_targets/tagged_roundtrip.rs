#![no_main]

use bebu_buffer::Buffer;
use bebu_wire::width::select_width;
use libfuzzer_sys::fuzz_target;

// Fuzz target: length tag write->read roundtrip.
//
// Takes a u64 and a sentinel flag, writes marker + magnitude, reads it
// back, and asserts the value and the chosen width survive.
fuzz_target!(|input: (u64, bool)| {
    let (value, reserve) = input;
    let mut buffer = Buffer::new();

    match buffer.write_length_tag(value, reserve) {
        Ok(written) => {
            let width = select_width(value, reserve).unwrap();
            assert_eq!(written, 1 + width.byte_len());

            let tag = buffer.read_length_tag().unwrap();
            assert_eq!(tag.value, value);
            assert_eq!(tag.width, width);
            assert!(buffer.is_empty());
        }
        // Only the largest value with a reserved sentinel cannot be tagged
        Err(_) => assert!(value == u64::MAX && reserve),
    }
});
