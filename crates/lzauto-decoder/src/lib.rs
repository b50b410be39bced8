#![warn(clippy::pedantic)]

pub mod auto;
pub mod config;
pub mod delegate;

pub use auto::AutoDecoder;
pub use config::DecoderConfig;
pub use delegate::{Delegate, DelegateFactory};
pub use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, Format, InBuf, OutBuf, Status};
