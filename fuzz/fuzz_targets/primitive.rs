#![no_main]

use bebu_wire::primitive;
use libfuzzer_sys::fuzz_target;

// Fuzz target: whole-span primitive decoders.
//
// Every decoder must either succeed or return an error for any span;
// a span of the exact width must always decode for the integer types.
fuzz_target!(|data: &[u8]| {
    let _ = primitive::decode_u8(data);
    let _ = primitive::decode_i16(data);
    let _ = primitive::decode_u32(data);
    let _ = primitive::decode_i64(data);
    let _ = primitive::decode_rune(data);
    let _ = primitive::decode_string(data);

    if data.len() == primitive::U64_SIZE {
        let value = primitive::decode_u64(data).unwrap();
        assert_eq!(primitive::encode_u64(value).as_slice(), data);
    }
});
