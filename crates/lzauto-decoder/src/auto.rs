use std::ops::ControlFlow;

use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, Format, InBuf, OutBuf, Status};

use crate::config::DecoderConfig;
use crate::delegate::{Delegate, DelegateFactory};

/// Outcome of one transition function: either an answer for the caller,
/// or "continue with the next state in this same call".
type Step = ControlFlow<Result<Status, CodecError>>;

/// Format-autodetecting decoder.
///
/// Looks at the first unconsumed input byte, asks its
/// [`DelegateFactory`] for the matching decoder, and from then on
/// forwards every call to that decoder. On top of the delegate it
/// enforces three rules that hold whichever format was found:
///
///   1. **Flags**: reserved bits are rejected when the decoder is built.
///   2. **Advisories**: legacy streams have no integrity check and their
///      decoder takes no flags, so `NoCheck` / `GetCheck` are produced
///      here, once, on the call that classifies the stream.
///   3. **Concatenation**: with `CONCATENATED` set, the delegate's
///      `StreamEnd` is held back until the caller says `Finish`, and any
///      byte still unread at that point is corrupt trailing data.
///
/// ```text
///   Init ──first byte──▶ Code ──StreamEnd + CONCATENATED──▶ Finish
///    │ (no input: stay)    │ (anything else: forward)        │
///    └─────────────────────┴─────────────────────────────────┘
///                   sequence never moves backwards
/// ```
///
/// # Example
///
/// ```rust
/// use lzauto_decoder::{
///     Action, AutoDecoder, CodecError, DecoderConfig, DecoderFlags, Delegate,
///     DelegateFactory, InBuf, OutBuf, Status,
/// };
///
/// // A "decoder" that copies its input through.
/// struct Passthrough;
///
/// impl Delegate for Passthrough {
///     fn advance(
///         &mut self,
///         input: &mut InBuf<'_>,
///         output: &mut OutBuf<'_>,
///         action: Action,
///     ) -> Result<Status, CodecError> {
///         let n = output.write(input.unread());
///         input.take(n);
///         match (input.is_exhausted(), action) {
///             (true, Action::Finish) => Ok(Status::StreamEnd),
///             _ => Ok(Status::Ok),
///         }
///     }
/// }
///
/// struct Factory;
///
/// impl DelegateFactory for Factory {
///     fn container(&mut self, _: u64, _: DecoderFlags) -> Result<Box<dyn Delegate>, CodecError> {
///         Ok(Box::new(Passthrough))
///     }
///
///     fn legacy(&mut self, _: u64) -> Result<Box<dyn Delegate>, CodecError> {
///         Ok(Box::new(Passthrough))
///     }
/// }
///
/// let mut decoder = AutoDecoder::new(Factory, DecoderConfig::default()).unwrap();
/// let data = [0x5D, 1, 2, 3];
/// let mut out = [0u8; 8];
/// let mut input = InBuf::new(&data);
/// let mut output = OutBuf::new(&mut out);
///
/// let status = decoder.advance(&mut input, &mut output, Action::Finish).unwrap();
/// assert_eq!(status, Status::StreamEnd);
/// assert_eq!(output.written(), &data);
/// ```
pub struct AutoDecoder<F> {
    factory: F,
    /// The selected decoder. `None` until the stream is classified.
    delegate: Option<Box<dyn Delegate>>,
    format: Option<Format>,
    memlimit: u64,
    flags: DecoderFlags,
    sequence: Sequence,
    /// Set once any error has been returned from `advance`.
    failed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sequence {
    /// Nothing classified yet.
    Init,
    /// Forwarding to the delegate.
    Code,
    /// Delegate finished a concatenated stream; waiting for `Finish`.
    Finish,
}

impl<F: DelegateFactory> AutoDecoder<F> {
    /// Create a decoder that will ask `factory` for its delegate.
    ///
    /// # Errors
    ///
    /// [`CodecError::Options`] if `config.flags` contains a bit outside
    /// [`DecoderFlags::SUPPORTED`].
    pub fn new(factory: F, config: DecoderConfig) -> Result<Self, CodecError> {
        config.validate()?;

        Ok(Self {
            factory,
            delegate: None,
            format: None,
            memlimit: config.memlimit,
            flags: config.flags,
            sequence: Sequence::Init,
            failed: false,
        })
    }

    /// Reuse this decoder for a new logical stream.
    ///
    /// Drops the current delegate and returns to the unclassified state.
    /// On error nothing is changed.
    ///
    /// # Errors
    ///
    /// [`CodecError::Options`] for unrecognized flag bits.
    pub fn reinit(&mut self, config: DecoderConfig) -> Result<(), CodecError> {
        config.validate()?;

        self.delegate = None;
        self.format = None;
        self.memlimit = config.memlimit;
        self.flags = config.flags;
        self.sequence = Sequence::Init;
        self.failed = false;
        tracing::trace!(memlimit = self.memlimit, flags = self.flags.raw(), "decoder reinitialized");
        Ok(())
    }

    /// Decode from `input` into `output`.
    ///
    /// The first call that carries input classifies the stream and
    /// creates the delegate; every later call is forwarded to it. Calls
    /// made before any input has arrived return `Status::Ok` and change
    /// nothing.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Memory`] / [`CodecError::Options`] if the
    ///   delegate cannot be created.
    /// - [`CodecError::Data`] if input remains after the last unit of a
    ///   concatenated stream.
    /// - [`CodecError::Prog`] when called again after an error has been
    ///   returned.
    /// - Anything the delegate returns, unchanged.
    pub fn advance(
        &mut self,
        input: &mut InBuf<'_>,
        output: &mut OutBuf<'_>,
        action: Action,
    ) -> Result<Status, CodecError> {
        if self.failed {
            return Err(CodecError::Prog("decoder used after it returned an error"));
        }

        let result = self.run(input, output, action);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "stream failed");
            self.failed = true;
        }
        result
    }

    /// Integrity check of the stream, as reported by the delegate.
    ///
    /// `CheckKind::None` before classification and for legacy streams.
    pub fn check(&self) -> CheckKind {
        self.delegate
            .as_deref()
            .and_then(|delegate| delegate.check())
            .unwrap_or_default()
    }

    /// Format picked by detection, once the first byte has been seen.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn memlimit(&self) -> u64 {
        self.memlimit
    }

    pub fn flags(&self) -> DecoderFlags {
        self.flags
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Tear the decoder down, releasing the delegate first.
    pub fn release(mut self) {
        if let Some(delegate) = self.delegate.take() {
            drop(delegate);
            tracing::trace!(format = ?self.format, "delegate released");
        }
    }

    /// Run the state machine from the current sequence until some state
    /// produces an answer.
    fn run(
        &mut self,
        input: &mut InBuf<'_>,
        output: &mut OutBuf<'_>,
        action: Action,
    ) -> Result<Status, CodecError> {
        loop {
            let step = match self.sequence {
                Sequence::Init => self.start(input),
                Sequence::Code => self.code(input, output, action),
                Sequence::Finish => return self.finish(input, action),
            };

            if let ControlFlow::Break(result) = step {
                return result;
            }
        }
    }

    /// `Init`: classify the stream and create the delegate.
    fn start(&mut self, input: &InBuf<'_>) -> Step {
        let Some(first) = input.peek() else {
            return ControlFlow::Break(Ok(Status::Ok));
        };

        // Advance before anything can return, so a call made after an
        // advisory resumes in Code.
        self.sequence = Sequence::Code;

        let format = Format::detect(first);
        tracing::debug!(?format, first_byte = first, "detected stream format");

        let delegate = match format {
            Format::Container => self.factory.container(self.memlimit, self.flags),
            Format::Legacy => self.factory.legacy(self.memlimit),
        };
        match delegate {
            Ok(delegate) => self.delegate = Some(delegate),
            Err(err) => return ControlFlow::Break(Err(err)),
        }
        self.format = Some(format);

        if format == Format::Legacy {
            if self.flags.tell_no_check() {
                tracing::trace!("legacy stream has no integrity check");
                return ControlFlow::Break(Ok(Status::NoCheck));
            }
            if self.flags.tell_any_check() {
                tracing::trace!("legacy stream check kind is queryable");
                return ControlFlow::Break(Ok(Status::GetCheck));
            }
        }

        ControlFlow::Continue(())
    }

    /// `Code`: forward to the delegate.
    fn code(&mut self, input: &mut InBuf<'_>, output: &mut OutBuf<'_>, action: Action) -> Step {
        let Some(delegate) = self.delegate.as_mut() else {
            return ControlFlow::Break(Err(CodecError::Prog("no delegate in Code state")));
        };

        match delegate.advance(input, output, action) {
            Ok(Status::StreamEnd) if self.flags.concatenated() => {
                tracing::trace!(remaining = input.remaining(), "unit ended, checking for trailing data");
                self.sequence = Sequence::Finish;
                ControlFlow::Continue(())
            }
            other => ControlFlow::Break(other),
        }
    }

    /// `Finish`: nothing may follow the last unit, and the end is only
    /// reported once the caller has declared end of input.
    fn finish(&self, input: &InBuf<'_>, action: Action) -> Result<Status, CodecError> {
        if !input.is_exhausted() {
            tracing::debug!(trailing = input.remaining(), "trailing data after last unit");
            return Err(CodecError::Data {
                trailing: input.remaining(),
            });
        }

        match action {
            Action::Finish => Ok(Status::StreamEnd),
            Action::Run => Ok(Status::Ok),
        }
    }
}
