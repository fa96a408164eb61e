use std::fmt;

use crate::error::WireError;
use crate::primitive::{
    decode_u16, decode_u32, decode_u64, decode_u8, encode_u16, encode_u32, encode_u64, encode_u8,
};

/// Width class of a length-tagged unsigned integer.
///
/// A collection length (or index) is stored with the narrowest unsigned
/// integer that can hold it. The chosen width travels on the wire as a
/// single marker byte whose value is the literal bit count:
///
/// ```text
/// ┌─────────┬─────────────┬───────────┬────────────────────────────┐
/// │ Variant │ Marker byte │ Magnitude │ Max magnitude              │
/// ├─────────┼─────────────┼───────────┼────────────────────────────┤
/// │ Bits8   │ 0x08        │ 1 byte    │ 255                        │
/// │ Bits16  │ 0x10        │ 2 bytes   │ 65 535                     │
/// │ Bits32  │ 0x20        │ 4 bytes   │ 4 294 967 295              │
/// │ Bits64  │ 0x40        │ 8 bytes   │ 18 446 744 073 709 551 615 │
/// └─────────┴─────────────┴───────────┴────────────────────────────┘
/// ```
///
/// Any other marker byte is a decode error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidthClass {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
}

impl WidthClass {
    /// All width classes, narrowest first.
    pub const ALL: [Self; 4] = [Self::Bits8, Self::Bits16, Self::Bits32, Self::Bits64];

    /// Number of bits in this width.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Number of magnitude bytes following the marker.
    pub fn byte_len(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
            Self::Bits32 => 4,
            Self::Bits64 => 8,
        }
    }

    /// Largest magnitude representable in this width.
    pub fn max_value(self) -> u64 {
        match self {
            Self::Bits8 => u64::from(u8::MAX),
            Self::Bits16 => u64::from(u16::MAX),
            Self::Bits32 => u64::from(u32::MAX),
            Self::Bits64 => u64::MAX,
        }
    }

    /// Whether `value` fits in this width.
    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }

    /// The on-wire marker byte (the literal bit count).
    pub fn marker(self) -> u8 {
        // bits() is at most 64
        #[allow(clippy::cast_possible_truncation)]
        let marker = self.bits() as u8;
        marker
    }

    /// Parse an on-wire marker byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnknownWidthMarker`] for anything but 8, 16, 32 or 64.
    pub fn from_marker(marker: u8) -> Result<Self, WireError> {
        match marker {
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            32 => Ok(Self::Bits32),
            64 => Ok(Self::Bits64),
            other => Err(WireError::UnknownWidthMarker { marker: other }),
        }
    }
}

impl TryFrom<u8> for WidthClass {
    type Error = WireError;

    fn try_from(marker: u8) -> Result<Self, Self::Error> {
        Self::from_marker(marker)
    }
}

impl From<WidthClass> for u8 {
    fn from(width: WidthClass) -> Self {
        width.marker()
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Select the narrowest width class able to hold `count`.
///
/// With `reserve_sentinel` set, one value of each width is kept back
/// (for example to encode "absent" as the maximum, or to store 1-based
/// offsets with 0 meaning none), so the usable maximum shrinks by one:
///
/// | count  | reserve | result |
/// |--------|---------|--------|
/// | 255    | false   | 8-bit  |
/// | 255    | true    | 16-bit |
/// | 65535  | false   | 16-bit |
/// | 65536  | false   | 32-bit |
///
/// # Errors
///
/// - [`WireError::NegativeLength`] if `count < 0`.
/// - [`WireError::Overflow`] if `count` (plus the sentinel) exceeds the
///   64-bit unsigned range.
pub fn select_width(
    count: impl Into<i128>,
    reserve_sentinel: bool,
) -> Result<WidthClass, WireError> {
    let count: i128 = count.into();
    let Ok(count) = u128::try_from(count) else {
        return Err(WireError::NegativeLength { len: count });
    };
    let reserved = u128::from(reserve_sentinel);

    WidthClass::ALL
        .into_iter()
        .find(|width| count + reserved <= u128::from(width.max_value()))
        .ok_or(WireError::Overflow {
            value: count,
            bits: WidthClass::Bits64.bits(),
        })
}

/// [`select_width`] for an in-memory collection length.
///
/// # Errors
///
/// [`WireError::Overflow`] only when `len == u64::MAX` and a sentinel is
/// reserved.
pub fn select_width_for_len(len: usize, reserve_sentinel: bool) -> Result<WidthClass, WireError> {
    select_width(len as u64, reserve_sentinel)
}

/// Check that `value` fits `width`.
///
/// # Errors
///
/// [`WireError::Overflow`] if it does not.
pub fn check_fits(value: u64, width: WidthClass) -> Result<(), WireError> {
    if width.fits(value) {
        Ok(())
    } else {
        Err(WireError::Overflow {
            value: u128::from(value),
            bits: width.bits(),
        })
    }
}

/// Encode `value` as a magnitude of exactly `width.byte_len()` bytes.
///
/// No marker byte is written; callers that need one emit
/// [`WidthClass::marker`] themselves.
///
/// # Errors
///
/// [`WireError::Overflow`] if `value` does not fit `width`.
pub fn encode_tagged(value: u64, width: WidthClass) -> Result<Vec<u8>, WireError> {
    check_fits(value, width)?;

    // Narrowing casts below are guarded by check_fits
    #[allow(clippy::cast_possible_truncation)]
    let bytes = match width {
        WidthClass::Bits8 => encode_u8(value as u8).to_vec(),
        WidthClass::Bits16 => encode_u16(value as u16).to_vec(),
        WidthClass::Bits32 => encode_u32(value as u32).to_vec(),
        WidthClass::Bits64 => encode_u64(value).to_vec(),
    };
    Ok(bytes)
}

/// Decode a magnitude of `width` and widen it to 64 bits.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data.len() == width.byte_len()`.
pub fn decode_tagged(data: &[u8], width: WidthClass) -> Result<u64, WireError> {
    match width {
        WidthClass::Bits8 => decode_u8(data).map(u64::from),
        WidthClass::Bits16 => decode_u16(data).map(u64::from),
        WidthClass::Bits32 => decode_u32(data).map(u64::from),
        WidthClass::Bits64 => decode_u64(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_boundaries() {
        assert_eq!(select_width(0, false).unwrap(), WidthClass::Bits8);
        assert_eq!(select_width(255, false).unwrap(), WidthClass::Bits8);
        assert_eq!(select_width(255, true).unwrap(), WidthClass::Bits16);
        assert_eq!(select_width(256, false).unwrap(), WidthClass::Bits16);
        assert_eq!(select_width(65_535, false).unwrap(), WidthClass::Bits16);
        assert_eq!(select_width(65_535, true).unwrap(), WidthClass::Bits32);
        assert_eq!(select_width(65_536, false).unwrap(), WidthClass::Bits32);
        assert_eq!(
            select_width(u64::from(u32::MAX), false).unwrap(),
            WidthClass::Bits32
        );
        assert_eq!(
            select_width(u64::from(u32::MAX), true).unwrap(),
            WidthClass::Bits64
        );
        assert_eq!(select_width(u64::MAX, false).unwrap(), WidthClass::Bits64);
    }

    #[test]
    fn reserved_sentinel_at_zero_still_8bit() {
        assert_eq!(select_width(0, true).unwrap(), WidthClass::Bits8);
        assert_eq!(select_width(254, true).unwrap(), WidthClass::Bits8);
    }

    #[test]
    fn negative_count_rejected() {
        for reserve in [false, true] {
            let result = select_width(-1, reserve);
            assert!(matches!(result, Err(WireError::NegativeLength { len: -1 })));
        }
    }

    #[test]
    fn overflow_with_sentinel_at_u64_max() {
        let result = select_width(u64::MAX, true);
        assert!(matches!(result, Err(WireError::Overflow { bits: 64, .. })));

        let result = select_width(i128::from(u64::MAX) + 1, false);
        assert!(matches!(result, Err(WireError::Overflow { .. })));
    }

    #[test]
    fn len_helper_matches_select_width() {
        assert_eq!(
            select_width_for_len(300, false).unwrap(),
            WidthClass::Bits16
        );
        assert_eq!(select_width_for_len(3, true).unwrap(), WidthClass::Bits8);
    }

    #[test]
    fn marker_values_are_bit_counts() {
        let markers: Vec<u8> = WidthClass::ALL.iter().map(|w| w.marker()).collect();
        assert_eq!(markers, vec![8, 16, 32, 64]);
        for width in WidthClass::ALL {
            assert_eq!(WidthClass::from_marker(width.marker()).unwrap(), width);
        }
    }

    #[test]
    fn unknown_markers_rejected() {
        for marker in [0u8, 1, 2, 3, 7, 9, 0x40 + 1, 0xFF] {
            let result = WidthClass::from_marker(marker);
            assert!(
                matches!(result, Err(WireError::UnknownWidthMarker { marker: m }) if m == marker),
                "marker {marker:#04X} should be rejected"
            );
        }
        assert_eq!(WidthClass::try_from(0x40).unwrap(), WidthClass::Bits64);
    }

    #[test]
    fn tagged_max_values_roundtrip() {
        for width in WidthClass::ALL {
            let max = width.max_value();
            let encoded = encode_tagged(max, width).unwrap();
            assert_eq!(encoded.len(), width.byte_len());
            assert_eq!(decode_tagged(&encoded, width).unwrap(), max);
        }
    }

    #[test]
    fn tagged_overflow_by_one() {
        for width in [WidthClass::Bits8, WidthClass::Bits16, WidthClass::Bits32] {
            let result = encode_tagged(width.max_value() + 1, width);
            assert!(
                matches!(result, Err(WireError::Overflow { bits, .. }) if bits == width.bits()),
                "{width} should overflow"
            );
        }
    }

    #[test]
    fn tagged_decode_wrong_length() {
        let result = decode_tagged(&[0x00, 0x01, 0x02], WidthClass::Bits16);
        assert!(matches!(result, Err(WireError::SizeMismatch { .. })));
    }

    #[test]
    fn display_names_width() {
        assert_eq!(WidthClass::Bits32.to_string(), "32-bit");
    }
}
