#![no_main]

use bebu_wire::width::{decode_tagged, select_width};
use bebu_wire::WidthClass;
use libfuzzer_sys::fuzz_target;

// Fuzz target: width marker byte followed by a magnitude.
//
// Catches bugs in:
// - Marker values outside 8|16|32|64
// - Magnitude spans shorter or longer than the marker implies
// - Selected width disagreeing with the decoded magnitude
fuzz_target!(|data: &[u8]| {
    let Some((&marker, rest)) = data.split_first() else {
        return;
    };
    let Ok(width) = WidthClass::from_marker(marker) else {
        return;
    };
    if let Ok(value) = decode_tagged(rest, width) {
        assert!(width.fits(value));
        let narrowest = select_width(value, false).unwrap();
        assert!(narrowest.bits() <= width.bits());
    }
});
