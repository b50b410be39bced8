/// Decoder flags bitfield.
///
/// Bit layout:
///   bit 0 = report `Status::NoCheck` when the stream has no integrity check
///   bit 1 = report `Status::UnsupportedCheck` (container decoder only)
///   bit 2 = report `Status::GetCheck` once the check kind is known
///   bit 3 = treat back-to-back units as one logical stream
///   bits 4-31 = reserved (MUST be 0)
///
/// `from_raw` never masks: reserved bits are kept so that
/// [`unsupported`](Self::unsupported) can report them and the decoder can
/// reject them with `CodecError::Options`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecoderFlags(u32);

impl DecoderFlags {
    pub const NONE: Self = Self(0);
    pub const TELL_NO_CHECK: Self = Self(0x01);
    pub const TELL_UNSUPPORTED_CHECK: Self = Self(0x02);
    pub const TELL_ANY_CHECK: Self = Self(0x04);
    pub const CONCATENATED: Self = Self(0x08);

    /// Every bit a decoder built by this workspace understands.
    pub const SUPPORTED: Self = Self(
        Self::TELL_NO_CHECK.0
            | Self::TELL_UNSUPPORTED_CHECK.0
            | Self::TELL_ANY_CHECK.0
            | Self::CONCATENATED.0,
    );

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bits outside [`SUPPORTED`](Self::SUPPORTED), as a raw value.
    pub fn unsupported(self) -> u32 {
        self.0 & !Self::SUPPORTED.0
    }

    pub fn tell_no_check(self) -> bool {
        self.contains(Self::TELL_NO_CHECK)
    }

    pub fn tell_unsupported_check(self) -> bool {
        self.contains(Self::TELL_UNSUPPORTED_CHECK)
    }

    pub fn tell_any_check(self) -> bool {
        self.contains(Self::TELL_ANY_CHECK)
    }

    pub fn concatenated(self) -> bool {
        self.contains(Self::CONCATENATED)
    }
}

impl std::ops::BitOr for DecoderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DecoderFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
