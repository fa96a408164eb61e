use std::fmt;
use std::io;

use bebu_wire::primitive::{
    self, I8_SIZE, I16_SIZE, I32_SIZE, I64_SIZE, RUNE_SIZE, STRING_TERMINATOR, U8_SIZE,
    U16_SIZE, U32_SIZE, U64_SIZE,
};
use bebu_wire::{Rune, WireError};
use bytes::{Buf, BytesMut};

use crate::error::BufferError;
use crate::marshal::{
    BinaryMarshal, BinaryUnmarshal, BufferDecode, BufferEncode, BufferUnmarshal,
};

/// In-memory byte container with consuming reads and appending writes.
///
/// A `Buffer` has no cursor: every successful read removes the bytes it
/// decoded from the front, every write appends to the back, so
/// [`len`](Self::len) is always the number of bytes still unread.
///
/// ```text
///   write_u16(0x0102)      write_string("ab")
///        │                       │
///        ▼                       ▼
///   ┌────┬────┬────┬────┬────┐
///   │ 01 │ 02 │ 61 │ 62 │ 00 │   len() == 5
///   └────┴────┴────┴────┴────┘
///     ▲
///     └── read_u16() takes these two, len() == 3
/// ```
///
/// Failed reads leave the buffer untouched: a fixed-width read that finds
/// too few bytes, a string read that finds no terminator and an
/// explicitly sized read that asks for more than remains all consume
/// nothing.
///
/// Content crosses the public boundary by copy. Construction copies the
/// caller's slice and [`bytes`](Self::bytes) returns a fresh `Vec`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    data: BytesMut,
}

impl Buffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding a copy of `data`.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: BytesMut::from(data),
        }
    }

    /// Create a buffer from hex text.
    ///
    /// # Errors
    ///
    /// [`WireError::MalformedHex`] on odd length or non-hex characters.
    pub fn from_hex(text: &str) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.write_hex(text)?;
        Ok(buffer)
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy of the unread content.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Unread content as lowercase hex. Does not consume anything.
    #[must_use]
    pub fn hex(&self) -> String {
        hex::encode(&self.data)
    }

    /// Drop all content.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    // ── Consuming primitives ──────────────────────────────────────────

    /// Borrow the first `n` unread bytes without consuming them.
    fn peek(&self, n: usize) -> Result<&[u8], WireError> {
        self.data.get(..n).ok_or(WireError::InsufficientData {
            available: self.data.len(),
            required: n,
        })
    }

    /// Decode the first `n` bytes with `decode`, then consume them.
    ///
    /// Nothing is consumed unless both the length check and the decode
    /// succeed.
    fn take_with<T>(
        &mut self,
        n: usize,
        decode: impl FnOnce(&[u8]) -> Result<T, WireError>,
    ) -> Result<T, BufferError> {
        let value = decode(self.peek(n)?)?;
        self.data.advance(n);
        Ok(value)
    }

    // ── Typed reads ───────────────────────────────────────────────────

    /// Consume one byte as `u8`.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if the buffer is empty.
    pub fn read_u8(&mut self) -> Result<u8, BufferError> {
        self.take_with(U8_SIZE, primitive::decode_u8)
    }

    pub fn read_i8(&mut self) -> Result<i8, BufferError> {
        self.take_with(I8_SIZE, primitive::decode_i8)
    }

    /// Consume 2 bytes as a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, BufferError> {
        self.take_with(U16_SIZE, primitive::decode_u16)
    }

    pub fn read_i16(&mut self) -> Result<i16, BufferError> {
        self.take_with(I16_SIZE, primitive::decode_i16)
    }

    /// Consume 4 bytes as a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, BufferError> {
        self.take_with(U32_SIZE, primitive::decode_u32)
    }

    pub fn read_i32(&mut self) -> Result<i32, BufferError> {
        self.take_with(I32_SIZE, primitive::decode_i32)
    }

    /// Consume 8 bytes as a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> Result<u64, BufferError> {
        self.take_with(U64_SIZE, primitive::decode_u64)
    }

    pub fn read_i64(&mut self) -> Result<i64, BufferError> {
        self.take_with(I64_SIZE, primitive::decode_i64)
    }

    /// Consume a 4-byte rune. Any 32-bit value is accepted.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if fewer than 4 bytes remain.
    pub fn read_rune(&mut self) -> Result<Rune, BufferError> {
        self.take_with(RUNE_SIZE, primitive::decode_rune)
    }

    /// Consume a zero-terminated string up to and including the first
    /// `0x00`.
    ///
    /// # Errors
    ///
    /// - [`WireError::MissingTerminator`] if no `0x00` remains.
    /// - [`WireError::InvalidUtf8`] if the content is not UTF-8.
    ///
    /// Nothing is consumed on error.
    pub fn read_string(&mut self) -> Result<String, BufferError> {
        let end = self.terminator_end()?;
        self.take_with(end, primitive::decode_string)
    }

    /// Consume a zero-terminated byte string up to and including the
    /// first `0x00`, returning the content bytes in whatever encoding
    /// the writer used.
    ///
    /// # Errors
    ///
    /// [`WireError::MissingTerminator`] if no `0x00` remains; nothing is
    /// consumed.
    pub fn read_string_bytes(&mut self) -> Result<Vec<u8>, BufferError> {
        let end = self.terminator_end()?;
        self.take_with(end, primitive::decode_string_bytes)
    }

    /// Length of the leading run up to and including the first `0x00`.
    fn terminator_end(&self) -> Result<usize, WireError> {
        self.data
            .iter()
            .position(|&b| b == STRING_TERMINATOR)
            .map(|at| at + 1)
            .ok_or(WireError::MissingTerminator)
    }

    /// Consume exactly `n` raw bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] reporting how many bytes were
    /// available; nothing is consumed.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, BufferError> {
        self.take_with(n, |data| Ok(data.to_vec()))
    }

    /// Consume exactly `n` bytes and return them as lowercase hex.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    pub fn read_hex(&mut self, n: usize) -> Result<String, BufferError> {
        self.take_with(n, |data| Ok(hex::encode(data)))
    }

    /// Fill `target` completely from the front of the buffer.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] if fewer than `target.len()` bytes
    /// remain.
    pub fn read_into(&mut self, target: &mut [u8]) -> Result<(), BufferError> {
        self.take_with(target.len(), |data| {
            target.copy_from_slice(data);
            Ok(())
        })
    }

    // ── Typed writes ──────────────────────────────────────────────────
    //
    // Appending to growable storage cannot fail short of an allocation
    // abort, so these return the byte count directly.

    pub fn write_u8(&mut self, value: u8) -> usize {
        self.write_bytes(&primitive::encode_u8(value))
    }

    pub fn write_i8(&mut self, value: i8) -> usize {
        self.write_bytes(&primitive::encode_i8(value))
    }

    pub fn write_u16(&mut self, value: u16) -> usize {
        self.write_bytes(&primitive::encode_u16(value))
    }

    pub fn write_i16(&mut self, value: i16) -> usize {
        self.write_bytes(&primitive::encode_i16(value))
    }

    pub fn write_u32(&mut self, value: u32) -> usize {
        self.write_bytes(&primitive::encode_u32(value))
    }

    pub fn write_i32(&mut self, value: i32) -> usize {
        self.write_bytes(&primitive::encode_i32(value))
    }

    pub fn write_u64(&mut self, value: u64) -> usize {
        self.write_bytes(&primitive::encode_u64(value))
    }

    pub fn write_i64(&mut self, value: i64) -> usize {
        self.write_bytes(&primitive::encode_i64(value))
    }

    pub fn write_rune(&mut self, value: Rune) -> usize {
        self.write_bytes(&primitive::encode_rune(value))
    }

    /// Append `value` followed by a `0x00` terminator.
    pub fn write_string(&mut self, value: &str) -> usize {
        self.write_bytes(&primitive::encode_string(value))
    }

    /// Append text bytes in any encoding followed by a `0x00` terminator.
    pub fn write_string_bytes(&mut self, value: &[u8]) -> usize {
        self.write_bytes(&primitive::encode_string_bytes(value))
    }

    /// Append raw bytes with no framing.
    pub fn write_bytes(&mut self, data: &[u8]) -> usize {
        self.data.extend_from_slice(data);
        data.len()
    }

    /// Decode hex text (either case) and append the bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::MalformedHex`] on odd length or non-hex characters;
    /// nothing is appended.
    pub fn write_hex(&mut self, text: &str) -> Result<usize, BufferError> {
        let data = hex::decode(text).map_err(WireError::from)?;
        Ok(self.write_bytes(&data))
    }

    // ── Dispatching reads and writes ──────────────────────────────────

    /// Append any [`BufferEncode`] value.
    ///
    /// # Errors
    ///
    /// Whatever the value's marshal contract reports.
    pub fn write<T: BufferEncode + ?Sized>(&mut self, value: &T) -> Result<usize, BufferError> {
        value.encode_into(self)
    }

    /// Decode any [`BufferDecode`] value into `out`.
    ///
    /// # Errors
    ///
    /// Whatever the target's decode reports.
    pub fn read<T: BufferDecode + ?Sized>(&mut self, out: &mut T) -> Result<(), BufferError> {
        out.decode_from(self)
    }

    /// Append the whole-value form of `value`.
    ///
    /// # Errors
    ///
    /// Whatever [`BinaryMarshal::marshal_binary`] reports; nothing is
    /// appended in that case.
    pub fn write_object<T: BinaryMarshal + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<usize, BufferError> {
        let data = value.marshal_binary()?;
        Ok(self.write_bytes(&data))
    }

    /// Let `target` consume its own bytes from the front of the buffer.
    ///
    /// # Errors
    ///
    /// Whatever [`BufferUnmarshal::unmarshal_from_buffer`] reports.
    pub fn read_object<T: BufferUnmarshal + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<(), BufferError> {
        target.unmarshal_from_buffer(self)
    }

    /// Consume exactly `n` bytes and hand them to `target` as its
    /// whole-value form.
    ///
    /// # Errors
    ///
    /// - [`WireError::InsufficientData`] if fewer than `n` bytes remain
    ///   (nothing consumed).
    /// - Whatever [`BinaryUnmarshal::unmarshal_binary`] reports (the `n`
    ///   bytes are already consumed).
    pub fn read_object_bytes<T: BinaryUnmarshal + ?Sized>(
        &mut self,
        target: &mut T,
        n: usize,
    ) -> Result<(), BufferError> {
        let data = self.read_bytes(n)?;
        target.unmarshal_binary(&data)
    }

    /// Borrow the buffer as a `std::io` stream.
    ///
    /// Reads through the adapter consume from the front, writes append.
    /// Kept separate from `Buffer` so `bytes()` and `read()` keep their
    /// non-draining meaning.
    pub fn io(&mut self) -> BufferIo<'_> {
        BufferIo { buffer: self }
    }
}

/// `std::io::Read` + `std::io::Write` over a borrowed [`Buffer`].
///
/// Obtained from [`Buffer::io`].
#[derive(Debug)]
pub struct BufferIo<'a> {
    buffer: &'a mut Buffer,
}

impl io::Read for BufferIo<'_> {
    /// Consume up to `buf.len()` bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.buffer.data.len());
        self.buffer.data.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }
}

impl io::Write for BufferIo<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.buffer.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl BinaryMarshal for Buffer {
    /// The unread content is the buffer's serialized form.
    fn marshal_binary(&self) -> Result<Vec<u8>, BufferError> {
        Ok(self.bytes())
    }
}

impl BinaryUnmarshal for Buffer {
    /// Replace the content wholesale.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.data = BytesMut::from(data);
        Ok(())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: BytesMut::from(&data[..]),
        }
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data)
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("hex", &self.hex())
            .finish()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
