use lzauto_wire::{CodecError, DecoderFlags};

/// Configuration for an [`AutoDecoder`](crate::AutoDecoder).
///
/// ```text
/// ┌──────────┬────────────────────────────────────────────────────────┐
/// │ Field    │ Purpose                                                │
/// ├──────────┼────────────────────────────────────────────────────────┤
/// │ memlimit │ Passed to whichever delegate is chosen, never read     │
/// │          │ by the dispatcher itself                               │
/// │ flags    │ Advisory reporting and concatenation behavior          │
/// └──────────┴────────────────────────────────────────────────────────┘
/// ```
///
/// Flags are checked once, when the decoder is created or reinitialized.
/// A config carrying reserved bits is rejected there with
/// `CodecError::Options`; nothing masks them silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Memory usage limit in bytes. `u64::MAX` means no limit.
    pub memlimit: u64,

    /// Decoder flags.
    pub flags: DecoderFlags,
}

impl Default for DecoderConfig {
    /// No memory limit, no flags.
    fn default() -> Self {
        Self {
            memlimit: u64::MAX,
            flags: DecoderFlags::NONE,
        }
    }
}

impl DecoderConfig {
    pub fn new(memlimit: u64, flags: DecoderFlags) -> Self {
        Self { memlimit, flags }
    }

    #[must_use]
    pub fn with_memlimit(mut self, memlimit: u64) -> Self {
        self.memlimit = memlimit;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// # Errors
    ///
    /// [`CodecError::Options`] if `flags` has any bit outside
    /// [`DecoderFlags::SUPPORTED`].
    pub fn validate(&self) -> Result<(), CodecError> {
        match self.flags.unsupported() {
            0 => Ok(()),
            _ => Err(CodecError::Options {
                flags: self.flags.raw(),
            }),
        }
    }
}
