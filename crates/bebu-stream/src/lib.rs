#![warn(clippy::pedantic)]

pub mod binary;
pub mod close;
pub mod contract;
pub mod counter;
mod dispatch;
pub mod error;
pub mod reader;
pub mod writer;

pub use binary::{BinaryRead, BinaryWrite};
pub use close::Close;
pub use contract::{
    BinaryInt8, BinaryInt16, BinaryInt32, BinaryInt64, BinaryReadFrom, BinaryRune, BinaryString,
    BinaryUint8, BinaryUint16, BinaryUint32, BinaryUint64, BinaryWriteTo, BuiltinSource,
    BuiltinTarget, ReadFrom, ReadTarget, WriteSource, WriteTo,
};
pub use counter::ByteCounter;
pub use error::StreamError;
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
