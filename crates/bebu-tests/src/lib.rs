//! Shared fixtures for the bebu integration tests and benches.
//!
//! [`Manifest`] speaks both the Buffer contracts and the stream contracts
//! with the same wire layout, so tests can write with one side and read
//! with the other:
//!
//! ```text
//!   name      string, 0x00-terminated
//!   version   u16
//!   count     length tag: marker (8|16|32|64) + magnitude
//!   entries   count × u32
//! ```

use bebu_buffer::{BinaryMarshal, Buffer, BufferError, BufferUnmarshal};
use bebu_stream::{
    BinaryRead, BinaryReadFrom, BinaryWrite, BinaryWriteTo, ReadTarget, StreamError, WriteSource,
};
use bebu_wire::WidthClass;
use bebu_wire::width::{decode_tagged, encode_tagged, select_width_for_len};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub version: u16,
    pub entries: Vec<u32>,
}

impl Manifest {
    /// A manifest with `count` sequential entries.
    #[must_use]
    pub fn sample(count: u32) -> Self {
        Self {
            name: "sample".into(),
            version: 3,
            entries: (0..count).collect(),
        }
    }
}

impl BinaryMarshal for Manifest {
    fn marshal_binary(&self) -> Result<Vec<u8>, BufferError> {
        let mut buffer = Buffer::new();
        buffer.write_string(&self.name);
        buffer.write_u16(self.version);
        buffer.write_length_tag(self.entries.len() as u64, false)?;
        for entry in &self.entries {
            buffer.write_u32(*entry);
        }
        Ok(buffer.bytes())
    }
}

impl BufferUnmarshal for Manifest {
    fn unmarshal_from_buffer(&mut self, buffer: &mut Buffer) -> Result<(), BufferError> {
        self.name = buffer.read_string()?;
        self.version = buffer.read_u16()?;
        let count = buffer.read_length_tag()?.value;
        let count = usize::try_from(count).map_err(BufferError::custom)?;
        self.entries = (0..count)
            .map(|_| buffer.read_u32())
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

impl BinaryWriteTo for Manifest {
    fn binary_write_to(&self, writer: &mut dyn BinaryWrite) -> Result<u64, StreamError> {
        let width = select_width_for_len(self.entries.len(), false)?;
        let mut written = writer.write_string_z(&self.name)?;
        written += writer.write_u16(self.version)?;
        written += writer.write_object(&width)? as usize;
        written += writer.write_bytes(&encode_tagged(self.entries.len() as u64, width)?)?;
        for entry in &self.entries {
            written += writer.write_u32(*entry)?;
        }
        Ok(written as u64)
    }
}

impl BinaryReadFrom for Manifest {
    fn binary_read_from(&mut self, reader: &mut dyn BinaryRead) -> Result<u64, StreamError> {
        self.name = reader.read_string_z()?;
        self.version = reader.read_u16()?;

        let mut width = WidthClass::Bits8;
        reader.read_object(&mut width)?;
        let count = decode_tagged(&reader.read_bytes_count(width.byte_len())?, width)?;
        let count = usize::try_from(count).map_err(StreamError::custom)?;

        self.entries = (0..count)
            .map(|_| reader.read_u32())
            .collect::<Result<_, _>>()?;

        let taken = self.name.len() + 1 + 2 + 1 + width.byte_len() + 4 * count;
        Ok(taken as u64)
    }
}

impl WriteSource for Manifest {
    fn as_binary_write_to(&self) -> Option<&dyn BinaryWriteTo> {
        Some(self)
    }
}

impl ReadTarget for Manifest {
    fn as_binary_read_from(&mut self) -> Option<&mut dyn BinaryReadFrom> {
        Some(self)
    }
}
