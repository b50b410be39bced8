// The container magic is six bytes, but only the first one is needed to
// tell the two formats apart: a legacy stream starts with its properties
// byte, which is always below 0xE1, so 0xFD can never open one.

/// Container stream magic: `FD 37 7A 58 5A 00` ("\xFD7zXZ\0").
pub const CONTAINER_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];

/// The single byte format detection looks at.
pub const CONTAINER_LEAD_BYTE: u8 = CONTAINER_MAGIC[0];

/// Stream format picked by detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Self-describing container with magic, flags and integrity check.
    Container,
    /// Headerless single-algorithm stream.
    Legacy,
}

impl Format {
    /// Classify a stream from its first byte. No further lookahead.
    pub fn detect(first: u8) -> Self {
        if first == CONTAINER_LEAD_BYTE {
            Self::Container
        } else {
            Self::Legacy
        }
    }
}
