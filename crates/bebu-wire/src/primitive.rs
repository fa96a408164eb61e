use std::fmt;

use crate::error::WireError;

// Byte sizes of every fixed-width wire type.
pub const U8_SIZE: usize = 1;
pub const I8_SIZE: usize = 1;
pub const U16_SIZE: usize = 2;
pub const I16_SIZE: usize = 2;
pub const U32_SIZE: usize = 4;
pub const I32_SIZE: usize = 4;
pub const U64_SIZE: usize = 8;
pub const I64_SIZE: usize = 8;
/// A rune travels as a signed 32-bit code point.
pub const RUNE_SIZE: usize = 4;

/// The byte appended after every zero-terminated string.
pub const STRING_TERMINATOR: u8 = 0x00;

/// A code point as it travels on the wire: any signed 32-bit value.
///
/// The codec never checks scalar-value legality, so surrogates and
/// negative values survive a round trip unchanged. Use
/// [`to_char`](Self::to_char) when a Rust `char` is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rune(pub i32);

impl Rune {
    /// The `char` for this code point, if it is a Unicode scalar value.
    #[must_use]
    pub fn to_char(self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }
}

impl From<char> for Rune {
    fn from(value: char) -> Self {
        // U+10FFFF is the largest char, well inside i32
        #[allow(clippy::cast_possible_wrap)]
        let code = u32::from(value) as i32;
        Self(code)
    }
}

impl From<i32> for Rune {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Rune> for i32 {
    fn from(value: Rune) -> Self {
        value.0
    }
}

impl fmt::Display for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(c) => write!(f, "{c}"),
            None => write!(f, "\\u{{{:x}}}", self.0),
        }
    }
}

/// Borrow `data` as a fixed-size array, rejecting any other length.
///
/// Both too few and too many bytes are refused: a fixed-width field
/// never silently ignores trailing input.
fn exact<const N: usize>(data: &[u8]) -> Result<[u8; N], WireError> {
    <[u8; N]>::try_from(data).map_err(|_| WireError::SizeMismatch {
        expected: N,
        actual: data.len(),
    })
}

// ── Decoding ──────────────────────────────────────────────────────────
//
// Every decoder takes the exact span for one value. Callers that hold a
// longer stream (Buffer, BinaryReader) slice off the prefix themselves.

/// Decode a single byte as `u8`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 1 byte.
pub fn decode_u8(data: &[u8]) -> Result<u8, WireError> {
    Ok(u8::from_be_bytes(exact(data)?))
}

/// Decode a single byte as two's-complement `i8`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 1 byte.
pub fn decode_i8(data: &[u8]) -> Result<i8, WireError> {
    Ok(i8::from_be_bytes(exact(data)?))
}

/// Decode 2 big-endian bytes as `u16`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 2 bytes.
pub fn decode_u16(data: &[u8]) -> Result<u16, WireError> {
    Ok(u16::from_be_bytes(exact(data)?))
}

/// Decode 2 big-endian bytes as `i16`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 2 bytes.
pub fn decode_i16(data: &[u8]) -> Result<i16, WireError> {
    Ok(i16::from_be_bytes(exact(data)?))
}

/// Decode 4 big-endian bytes as `u32`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 4 bytes.
pub fn decode_u32(data: &[u8]) -> Result<u32, WireError> {
    Ok(u32::from_be_bytes(exact(data)?))
}

/// Decode 4 big-endian bytes as `i32`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 4 bytes.
pub fn decode_i32(data: &[u8]) -> Result<i32, WireError> {
    Ok(i32::from_be_bytes(exact(data)?))
}

/// Decode 8 big-endian bytes as `u64`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 8 bytes.
pub fn decode_u64(data: &[u8]) -> Result<u64, WireError> {
    Ok(u64::from_be_bytes(exact(data)?))
}

/// Decode 8 big-endian bytes as `i64`.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 8 bytes.
pub fn decode_i64(data: &[u8]) -> Result<i64, WireError> {
    Ok(i64::from_be_bytes(exact(data)?))
}

/// Decode a rune: 4 big-endian bytes holding a signed 32-bit code point.
///
/// # Errors
///
/// [`WireError::SizeMismatch`] unless `data` is exactly 4 bytes.
pub fn decode_rune(data: &[u8]) -> Result<Rune, WireError> {
    Ok(Rune(decode_i32(data)?))
}

/// Decode a zero-terminated byte string occupying the whole span.
///
/// The terminator must be the *last* byte of `data`; everything before
/// it is returned as-is, whatever text encoding the writer used.
///
/// # Errors
///
/// [`WireError::MissingTerminator`] if `data` is empty or does not end
/// with `0x00`.
pub fn decode_string_bytes(data: &[u8]) -> Result<Vec<u8>, WireError> {
    match data.split_last() {
        Some((&STRING_TERMINATOR, content)) => Ok(content.to_vec()),
        _ => Err(WireError::MissingTerminator),
    }
}

/// Decode a zero-terminated UTF-8 string occupying the whole span.
///
/// The terminator must be the *last* byte of `data`. Bytes before it
/// are returned as text; an embedded `0x00` earlier in the span is kept
/// as part of the string. Streaming readers stop at the first
/// terminator instead, see `BinaryRead::read_string_z`.
///
/// # Errors
///
/// - [`WireError::MissingTerminator`] if `data` is empty or does not
///   end with `0x00`.
/// - [`WireError::InvalidUtf8`] if the content is not UTF-8; use
///   [`decode_string_bytes`] for other encodings.
pub fn decode_string(data: &[u8]) -> Result<String, WireError> {
    Ok(String::from_utf8(decode_string_bytes(data)?)?)
}

// ── Encoding ──────────────────────────────────────────────────────────

pub fn encode_u8(value: u8) -> [u8; U8_SIZE] {
    value.to_be_bytes()
}

pub fn encode_i8(value: i8) -> [u8; I8_SIZE] {
    value.to_be_bytes()
}

pub fn encode_u16(value: u16) -> [u8; U16_SIZE] {
    value.to_be_bytes()
}

pub fn encode_i16(value: i16) -> [u8; I16_SIZE] {
    value.to_be_bytes()
}

pub fn encode_u32(value: u32) -> [u8; U32_SIZE] {
    value.to_be_bytes()
}

pub fn encode_i32(value: i32) -> [u8; I32_SIZE] {
    value.to_be_bytes()
}

pub fn encode_u64(value: u64) -> [u8; U64_SIZE] {
    value.to_be_bytes()
}

pub fn encode_i64(value: i64) -> [u8; I64_SIZE] {
    value.to_be_bytes()
}

/// Encode a rune as its code point, same layout as [`encode_i32`].
pub fn encode_rune(value: Rune) -> [u8; RUNE_SIZE] {
    encode_i32(value.0)
}

/// Encode `value` as its UTF-8 bytes followed by one `0x00`.
///
/// The string is not length-prefixed. A string containing `0x00` will
/// encode fine but cannot be read back past that byte by a streaming
/// reader.
pub fn encode_string(value: &str) -> Vec<u8> {
    encode_string_bytes(value.as_bytes())
}

/// Encode raw text bytes in any encoding followed by one `0x00`.
pub fn encode_string_bytes(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 1);
    out.extend_from_slice(value);
    out.push(STRING_TERMINATOR);
    out
}
