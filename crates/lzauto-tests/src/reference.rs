//! Reference delegates for exercising the dispatcher end-to-end.
//!
//! Both formats store their payload uncompressed. They have just
//! enough structure to behave like the real decoders at the seams the
//! dispatcher cares about: header parsing, partial input and output,
//! stream end, advisories, memory limits and format errors.
//!
//! ```text
//!   legacy unit:     [props < 0xE1] [len] [payload; len]
//!   container unit:  [FD 37 7A 58 5A 00] [check id] [len] [payload; len]
//! ```

use std::cell::Cell;
use std::rc::Rc;

use lzauto_decoder::{Delegate, DelegateFactory};
use lzauto_wire::magic::CONTAINER_MAGIC;
use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, Format, InBuf, OutBuf, Status};

/// Largest valid legacy properties byte (`(4 * 5 + 4) * 9 + 8`).
pub const LEGACY_PROPS_MAX: u8 = 0xE0;

/// Memory both reference decoders claim to need.
pub const REFERENCE_MEMUSAGE: u64 = 64 * 1024;

/// Encode one legacy unit.
///
/// # Panics
///
/// If `props` is out of range or `payload` is longer than 255 bytes.
pub fn legacy_unit(props: u8, payload: &[u8]) -> Vec<u8> {
    assert!(props <= LEGACY_PROPS_MAX, "props byte {props:#04X} out of range");
    let len = u8::try_from(payload.len()).expect("legacy payload longer than 255 bytes");

    let mut unit = vec![props, len];
    unit.extend_from_slice(payload);
    unit
}

/// Encode one container unit.
///
/// # Panics
///
/// If `payload` is longer than 255 bytes.
pub fn container_unit(check: CheckKind, payload: &[u8]) -> Vec<u8> {
    let len = u8::try_from(payload.len()).expect("container payload longer than 255 bytes");

    let mut unit = CONTAINER_MAGIC.to_vec();
    unit.push(check.id());
    unit.push(len);
    unit.extend_from_slice(payload);
    unit
}

/// Shared count of delegates that have been created and not yet dropped.
#[derive(Clone, Debug, Default)]
pub struct LiveCount(Rc<Cell<usize>>);

impl LiveCount {
    pub fn get(&self) -> usize {
        self.0.get()
    }

    fn enter(&self) -> LiveGuard {
        self.0.set(self.0.get() + 1);
        LiveGuard(Rc::clone(&self.0))
    }
}

struct LiveGuard(Rc<Cell<usize>>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Factory handing out the reference delegates, recording every request.
#[derive(Default)]
pub struct ReferenceFactory {
    /// Format of each delegate created, in order.
    pub created: Vec<Format>,
    /// Flags each container delegate was created with.
    pub container_flags: Vec<DecoderFlags>,
    /// Memory limit passed with each request.
    pub memlimits: Vec<u64>,
    pub live: LiveCount,
    /// Error to return from the next request instead of a delegate.
    pub fail_next: Option<CodecError>,
}

impl ReferenceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: CodecError) -> Self {
        Self {
            fail_next: Some(err),
            ..Self::default()
        }
    }
}

impl DelegateFactory for ReferenceFactory {
    fn container(
        &mut self,
        memlimit: u64,
        flags: DecoderFlags,
    ) -> Result<Box<dyn Delegate>, CodecError> {
        self.memlimits.push(memlimit);
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }

        self.created.push(Format::Container);
        self.container_flags.push(flags);
        Ok(Box::new(ContainerDecoder::new(memlimit, flags, self.live.enter())))
    }

    fn legacy(&mut self, memlimit: u64) -> Result<Box<dyn Delegate>, CodecError> {
        self.memlimits.push(memlimit);
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }

        self.created.push(Format::Legacy);
        Ok(Box::new(LegacyDecoder::new(memlimit, self.live.enter())))
    }
}

/// Ran out of input: fine while more may come, truncation otherwise.
fn starved(action: Action) -> Result<Status, CodecError> {
    match action {
        Action::Run => Ok(Status::Ok),
        Action::Finish => Err(CodecError::corrupt()),
    }
}

/// Copy up to `left` payload bytes. Returns how many were copied.
fn copy_payload(input: &mut InBuf<'_>, output: &mut OutBuf<'_>, left: usize) -> usize {
    let unread = input.unread();
    let n = output.write(&unread[..left.min(unread.len())]);
    input.take(n);
    n
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LegacyState {
    Props,
    Len,
    Payload { left: usize },
    Done,
}

/// Decoder for one legacy unit. Takes no flags and has no check.
pub struct LegacyDecoder {
    state: LegacyState,
    memlimit: u64,
    _live: LiveGuard,
}

impl LegacyDecoder {
    fn new(memlimit: u64, live: LiveGuard) -> Self {
        Self {
            state: LegacyState::Props,
            memlimit,
            _live: live,
        }
    }
}

impl Delegate for LegacyDecoder {
    fn advance(
        &mut self,
        input: &mut InBuf<'_>,
        output: &mut OutBuf<'_>,
        action: Action,
    ) -> Result<Status, CodecError> {
        loop {
            match self.state {
                LegacyState::Props => {
                    let Some(props) = input.next_byte() else {
                        return starved(action);
                    };
                    if props > LEGACY_PROPS_MAX {
                        return Err(CodecError::Format);
                    }
                    if self.memlimit < REFERENCE_MEMUSAGE {
                        return Err(CodecError::MemLimit {
                            limit: self.memlimit,
                        });
                    }
                    self.state = LegacyState::Len;
                }
                LegacyState::Len => {
                    let Some(len) = input.next_byte() else {
                        return starved(action);
                    };
                    self.state = LegacyState::Payload {
                        left: usize::from(len),
                    };
                }
                LegacyState::Payload { left: 0 } => self.state = LegacyState::Done,
                LegacyState::Payload { left } => {
                    if output.is_full() {
                        return Ok(Status::Ok);
                    }
                    if input.is_exhausted() {
                        return starved(action);
                    }
                    let n = copy_payload(input, output, left);
                    self.state = LegacyState::Payload { left: left - n };
                }
                LegacyState::Done => return Ok(Status::StreamEnd),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContainerState {
    Magic { matched: usize },
    Check,
    Len,
    Payload { left: usize },
    UnitEnd,
}

/// Decoder for container units.
///
/// Honors every decoder flag itself: advisories are reported after each
/// unit header, and with `CONCATENATED` a new unit may follow the last
/// one directly.
pub struct ContainerDecoder {
    state: ContainerState,
    memlimit: u64,
    flags: DecoderFlags,
    check: CheckKind,
    _live: LiveGuard,
}

impl ContainerDecoder {
    fn new(memlimit: u64, flags: DecoderFlags, live: LiveGuard) -> Self {
        Self {
            state: ContainerState::Magic { matched: 0 },
            memlimit,
            flags,
            check: CheckKind::None,
            _live: live,
        }
    }

    /// Advisory owed after reading a unit header, if the flags ask for one.
    fn advisory(&self) -> Option<Status> {
        if self.flags.tell_no_check() && self.check == CheckKind::None {
            return Some(Status::NoCheck);
        }
        if self.flags.tell_unsupported_check() && matches!(self.check, CheckKind::Other(_)) {
            return Some(Status::UnsupportedCheck);
        }
        if self.flags.tell_any_check() {
            return Some(Status::GetCheck);
        }
        None
    }
}

impl Delegate for ContainerDecoder {
    fn advance(
        &mut self,
        input: &mut InBuf<'_>,
        output: &mut OutBuf<'_>,
        action: Action,
    ) -> Result<Status, CodecError> {
        loop {
            match self.state {
                ContainerState::Magic { matched } => {
                    let Some(byte) = input.next_byte() else {
                        return starved(action);
                    };
                    if byte != CONTAINER_MAGIC[matched] {
                        return Err(CodecError::Format);
                    }
                    if matched + 1 < CONTAINER_MAGIC.len() {
                        self.state = ContainerState::Magic {
                            matched: matched + 1,
                        };
                        continue;
                    }
                    if self.memlimit < REFERENCE_MEMUSAGE {
                        return Err(CodecError::MemLimit {
                            limit: self.memlimit,
                        });
                    }
                    self.state = ContainerState::Check;
                }
                ContainerState::Check => {
                    let Some(id) = input.next_byte() else {
                        return starved(action);
                    };
                    if id > CheckKind::ID_MAX {
                        return Err(CodecError::Options { flags: u32::from(id) });
                    }
                    self.check = CheckKind::from_id(id);
                    self.state = ContainerState::Len;
                    if let Some(status) = self.advisory() {
                        return Ok(status);
                    }
                }
                ContainerState::Len => {
                    let Some(len) = input.next_byte() else {
                        return starved(action);
                    };
                    self.state = ContainerState::Payload {
                        left: usize::from(len),
                    };
                }
                ContainerState::Payload { left: 0 } => self.state = ContainerState::UnitEnd,
                ContainerState::Payload { left } => {
                    if output.is_full() {
                        return Ok(Status::Ok);
                    }
                    if input.is_exhausted() {
                        return starved(action);
                    }
                    let n = copy_payload(input, output, left);
                    self.state = ContainerState::Payload { left: left - n };
                }
                ContainerState::UnitEnd => {
                    if !self.flags.concatenated() {
                        return Ok(Status::StreamEnd);
                    }
                    if !input.is_exhausted() {
                        self.state = ContainerState::Magic { matched: 0 };
                        continue;
                    }
                    return match action {
                        Action::Finish => Ok(Status::StreamEnd),
                        Action::Run => Ok(Status::Ok),
                    };
                }
            }
        }
    }

    fn check(&self) -> Option<CheckKind> {
        Some(self.check)
    }
}
