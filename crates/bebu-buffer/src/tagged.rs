use bebu_wire::WidthClass;
use bebu_wire::primitive::decode_u8;
use bebu_wire::width::{check_fits, select_width};

use crate::buffer::Buffer;
use crate::error::BufferError;
use crate::marshal::{BinaryMarshal, BinaryUnmarshal, BufferUnmarshal};

/// A count stored with the narrowest sufficient width.
///
/// Wire layout:
///
/// ```text
///   marker (u8: 8 | 16 | 32 | 64) │ magnitude (marker / 8 bytes, big-endian)
/// ```
///
/// `LengthTag::new(300, false)` encodes as `10 012c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthTag {
    pub width: WidthClass,
    pub value: u64,
}

impl LengthTag {
    /// Tag `value` with the narrowest width that holds it.
    ///
    /// # Errors
    ///
    /// [`WireError::Overflow`](bebu_wire::WireError::Overflow) only for
    /// `u64::MAX` with a reserved sentinel.
    pub fn new(value: u64, reserve_sentinel: bool) -> Result<Self, BufferError> {
        let width = select_width(value, reserve_sentinel)?;
        Ok(Self { width, value })
    }

    /// Tag `value` with a caller-chosen width.
    ///
    /// # Errors
    ///
    /// [`WireError::Overflow`](bebu_wire::WireError::Overflow) if `value`
    /// does not fit `width`.
    pub fn with_width(value: u64, width: WidthClass) -> Result<Self, BufferError> {
        check_fits(value, width)?;
        Ok(Self { width, value })
    }

    /// Total encoded size: marker plus magnitude.
    pub fn encoded_len(self) -> usize {
        1 + self.width.byte_len()
    }
}

impl Buffer {
    /// Append `value` as a magnitude of exactly `width` (no marker byte).
    ///
    /// # Errors
    ///
    /// [`WireError::Overflow`](bebu_wire::WireError::Overflow) if `value`
    /// does not fit `width`; nothing is appended.
    pub fn write_tagged(&mut self, value: u64, width: WidthClass) -> Result<usize, BufferError> {
        check_fits(value, width)?;

        // Narrowing casts are guarded by check_fits
        #[allow(clippy::cast_possible_truncation)]
        let written = match width {
            WidthClass::Bits8 => self.write_u8(value as u8),
            WidthClass::Bits16 => self.write_u16(value as u16),
            WidthClass::Bits32 => self.write_u32(value as u32),
            WidthClass::Bits64 => self.write_u64(value),
        };
        Ok(written)
    }

    /// Consume a magnitude of `width` bytes and widen it to `u64`.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`](bebu_wire::WireError::InsufficientData)
    /// if fewer than `width.byte_len()` bytes remain.
    pub fn read_tagged(&mut self, width: WidthClass) -> Result<u64, BufferError> {
        Ok(match width {
            WidthClass::Bits8 => u64::from(self.read_u8()?),
            WidthClass::Bits16 => u64::from(self.read_u16()?),
            WidthClass::Bits32 => u64::from(self.read_u32()?),
            WidthClass::Bits64 => self.read_u64()?,
        })
    }

    /// Append a width marker byte.
    pub fn write_width(&mut self, width: WidthClass) -> usize {
        self.write_u8(width.marker())
    }

    /// Consume a width marker byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnknownWidthMarker`](bebu_wire::WireError::UnknownWidthMarker)
    /// for an illegal marker. The marker byte is consumed either way.
    pub fn read_width(&mut self) -> Result<WidthClass, BufferError> {
        let marker = self.read_u8()?;
        Ok(WidthClass::from_marker(marker)?)
    }

    /// Append `value` as marker + magnitude using the narrowest width.
    ///
    /// # Errors
    ///
    /// See [`LengthTag::new`].
    pub fn write_length_tag(
        &mut self,
        value: u64,
        reserve_sentinel: bool,
    ) -> Result<usize, BufferError> {
        let tag = LengthTag::new(value, reserve_sentinel)?;
        self.write_object(&tag)
    }

    /// Consume a marker + magnitude pair.
    ///
    /// # Errors
    ///
    /// Illegal marker or too few magnitude bytes.
    pub fn read_length_tag(&mut self) -> Result<LengthTag, BufferError> {
        let width = self.read_width()?;
        let value = self.read_tagged(width)?;
        Ok(LengthTag { width, value })
    }
}

impl BinaryMarshal for WidthClass {
    fn marshal_binary(&self) -> Result<Vec<u8>, BufferError> {
        Ok(vec![self.marker()])
    }
}

impl BinaryUnmarshal for WidthClass {
    /// Requires exactly one byte holding a legal marker.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BufferError> {
        *self = Self::from_marker(decode_u8(data)?)?;
        Ok(())
    }
}

impl BufferUnmarshal for WidthClass {
    fn unmarshal_from_buffer(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        *self = buffer.read_width()?;
        Ok(())
    }
}

impl BinaryMarshal for LengthTag {
    fn marshal_binary(&self) -> Result<Vec<u8>, BufferError> {
        let mut buffer = Buffer::new();
        buffer.write_width(self.width);
        buffer.write_tagged(self.value, self.width)?;
        Ok(buffer.bytes())
    }
}

impl BufferUnmarshal for LengthTag {
    fn unmarshal_from_buffer(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        *self = buffer.read_length_tag()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bebu_wire::WireError;

    use super::*;

    #[test]
    fn tagged_max_roundtrip_per_width() {
        for width in WidthClass::ALL {
            let mut buffer = Buffer::new();
            let written = buffer.write_tagged(width.max_value(), width).unwrap();
            assert_eq!(written, width.byte_len());
            assert_eq!(buffer.read_tagged(width).unwrap(), width.max_value());
            assert!(buffer.is_empty());
        }
    }

    #[test]
    fn tagged_overflow_writes_nothing() {
        let mut buffer = Buffer::new();
        let result = buffer.write_tagged(256, WidthClass::Bits8);
        assert!(matches!(
            result,
            Err(BufferError::Wire(WireError::Overflow { value: 256, bits: 8 }))
        ));
        assert!(buffer.is_empty());

        let result = buffer.write_tagged(u64::from(u32::MAX) + 1, WidthClass::Bits32);
        assert!(result.is_err());
    }

    #[test]
    fn read_tagged_short_input() {
        let mut buffer = Buffer::from_bytes(&[0x01, 0x02, 0x03]);
        let result = buffer.read_tagged(WidthClass::Bits32);
        assert!(matches!(
            result,
            Err(BufferError::Wire(WireError::InsufficientData { .. }))
        ));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn width_marker_decode() {
        let mut buffer = Buffer::from_bytes(&[0x40]);
        assert_eq!(buffer.read_width().unwrap(), WidthClass::Bits64);

        let mut buffer = Buffer::from_bytes(&[0x07]);
        let result = buffer.read_width();
        assert!(matches!(
            result,
            Err(BufferError::Wire(WireError::UnknownWidthMarker { marker: 0x07 }))
        ));
    }

    #[test]
    fn width_class_whole_value() {
        let mut buffer = Buffer::new();
        buffer.write(&WidthClass::Bits16).unwrap();
        assert_eq!(buffer.hex(), "10");

        let mut width = WidthClass::Bits8;
        width.unmarshal_binary(&[0x20]).unwrap();
        assert_eq!(width, WidthClass::Bits32);

        assert!(width.unmarshal_binary(&[0x20, 0x20]).is_err());
        assert!(width.unmarshal_binary(&[]).is_err());
    }

    #[test]
    fn length_tag_picks_narrowest() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.write_length_tag(300, false).unwrap(), 3);
        assert_eq!(buffer.write_length_tag(255, true).unwrap(), 3);
        assert_eq!(buffer.write_length_tag(7, false).unwrap(), 2);
        assert_eq!(buffer.hex(), "10012c1000ff0807");

        let tag = buffer.read_length_tag().unwrap();
        assert_eq!(
            tag,
            LengthTag {
                width: WidthClass::Bits16,
                value: 300
            }
        );
        assert_eq!(tag.encoded_len(), 3);
        assert_eq!(buffer.read_length_tag().unwrap().value, 255);

        let mut tag = LengthTag::with_width(0, WidthClass::Bits64).unwrap();
        buffer.read(&mut tag).unwrap();
        assert_eq!(tag.width, WidthClass::Bits8);
        assert_eq!(tag.value, 7);
    }

    #[test]
    fn length_tag_with_width_checks_fit() {
        assert!(LengthTag::with_width(70_000, WidthClass::Bits16).is_err());
        assert!(LengthTag::with_width(70_000, WidthClass::Bits32).is_ok());
    }
}
