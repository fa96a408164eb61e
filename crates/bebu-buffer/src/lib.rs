#![warn(clippy::pedantic)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod file;
pub mod marshal;
pub mod tagged;

pub use buffer::{Buffer, BufferIo};
pub use config::LoadOptions;
pub use error::BufferError;
pub use file::{load_whole_value, load_whole_value_with, save_whole_value};
pub use marshal::{BinaryMarshal, BinaryUnmarshal, BufferDecode, BufferEncode, BufferUnmarshal};
pub use tagged::LengthTag;
