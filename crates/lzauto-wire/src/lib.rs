#![warn(clippy::pedantic)]

pub mod buffer;
pub mod check;
pub mod error;
pub mod flags;
pub mod magic;
pub mod status;

pub use buffer::{InBuf, OutBuf};
pub use check::CheckKind;
pub use error::CodecError;
pub use flags::DecoderFlags;
pub use magic::Format;
pub use status::{Action, Status};
