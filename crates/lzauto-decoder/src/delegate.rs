use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, InBuf, OutBuf, Status};

/// A concrete decoder the dispatcher can hand a stream to.
///
/// Both the container decoder and the legacy decoder implement this
/// trait; [`AutoDecoder`](crate::AutoDecoder) holds the selected one as a
/// `Box<dyn Delegate>` and never learns which it is.
///
/// A delegate consumes from `input` and produces into `output`,
/// advancing their cursors, and answers with the same result
/// vocabulary the dispatcher returns to its caller. Resources are
/// released when the box is dropped.
pub trait Delegate {
    /// Decode as much as the buffers allow.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`]; the dispatcher forwards it unchanged.
    fn advance(
        &mut self,
        input: &mut InBuf<'_>,
        output: &mut OutBuf<'_>,
        action: Action,
    ) -> Result<Status, CodecError>;

    /// Integrity check of the stream being decoded.
    ///
    /// `None` means the decoder has no notion of an integrity check at
    /// all, which is the legacy format's answer. A container decoder
    /// that has not read its stream header yet answers
    /// `Some(CheckKind::None)`.
    fn check(&self) -> Option<CheckKind> {
        None
    }
}

/// Creates the delegate once the stream format is known.
///
/// The legacy format has no header that could carry flags, so
/// [`legacy`](Self::legacy) only receives the memory limit. The
/// container decoder gets the caller's flags verbatim.
pub trait DelegateFactory {
    /// # Errors
    ///
    /// `CodecError::Memory` when the decoder cannot be allocated, or
    /// `CodecError::Options` when it rejects `flags`.
    fn container(
        &mut self,
        memlimit: u64,
        flags: DecoderFlags,
    ) -> Result<Box<dyn Delegate>, CodecError>;

    /// # Errors
    ///
    /// `CodecError::Memory` when the decoder cannot be allocated.
    fn legacy(&mut self, memlimit: u64) -> Result<Box<dyn Delegate>, CodecError>;
}

impl<F: DelegateFactory + ?Sized> DelegateFactory for &mut F {
    fn container(
        &mut self,
        memlimit: u64,
        flags: DecoderFlags,
    ) -> Result<Box<dyn Delegate>, CodecError> {
        (**self).container(memlimit, flags)
    }

    fn legacy(&mut self, memlimit: u64) -> Result<Box<dyn Delegate>, CodecError> {
        (**self).legacy(memlimit)
    }
}

impl<F: DelegateFactory + ?Sized> DelegateFactory for Box<F> {
    fn container(
        &mut self,
        memlimit: u64,
        flags: DecoderFlags,
    ) -> Result<Box<dyn Delegate>, CodecError> {
        (**self).container(memlimit, flags)
    }

    fn legacy(&mut self, memlimit: u64) -> Result<Box<dyn Delegate>, CodecError> {
        (**self).legacy(memlimit)
    }
}
