/// Integrity check carried by a stream.
///
/// Container streams declare their check in the stream header using the
/// IDs below. Legacy streams have no check at all and are always
/// reported as [`CheckKind::None`].
///
/// ```text
/// ┌──────┬─────────┐
/// │ ID   │ Check   │
/// ├──────┼─────────┤
/// │ 0x00 │ None    │
/// │ 0x01 │ CRC32   │
/// │ 0x04 │ CRC64   │
/// │ 0x0A │ SHA-256 │
/// │ else │ Other   │ ← reserved IDs up to 0x0F
/// └──────┴─────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckKind {
    #[default]
    None,
    Crc32,
    Crc64,
    Sha256,
    /// A check ID this workspace has no name for.
    Other(u8),
}

impl CheckKind {
    /// Largest check ID the container format can express.
    pub const ID_MAX: u8 = 0x0F;

    pub fn from_id(id: u8) -> Self {
        match id {
            0x00 => Self::None,
            0x01 => Self::Crc32,
            0x04 => Self::Crc64,
            0x0A => Self::Sha256,
            other => Self::Other(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Crc32 => 0x01,
            Self::Crc64 => 0x04,
            Self::Sha256 => 0x0A,
            Self::Other(id) => id,
        }
    }
}
