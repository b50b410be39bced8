#![warn(clippy::pedantic)]

pub mod reference;
pub mod session;

pub use reference::{
    ContainerDecoder, LegacyDecoder, LiveCount, ReferenceFactory, container_unit, legacy_unit,
};
pub use session::{Transcript, decode_all, decode_chunked};
