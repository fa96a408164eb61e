#![warn(clippy::pedantic)]

pub mod error;
pub mod primitive;
pub mod width;

pub use error::WireError;
pub use primitive::Rune;
pub use width::{WidthClass, select_width, select_width_for_len};
