//! Drives an [`AutoDecoder`] over a whole input the way a streaming
//! caller would: input arrives in chunks, output is drained in chunks,
//! and `Finish` is only declared once the last chunk has been handed in.

use std::fmt::Write as _;

use lzauto_decoder::{AutoDecoder, DelegateFactory};
use lzauto_wire::{Action, CodecError, InBuf, OutBuf, Status};

/// Upper bound on `advance` calls per session, so a decoder that stops
/// making progress fails the test instead of hanging it.
const MAX_CALLS: usize = 100_000;

/// Everything observed while decoding one input.
#[derive(Debug, Default)]
pub struct Transcript {
    pub output: Vec<u8>,
    /// Every successful status, in call order.
    pub statuses: Vec<Status>,
    /// The error that ended the session, if any.
    pub error: Option<CodecError>,
    /// Input bytes consumed when the session ended.
    pub consumed: usize,
}

impl Transcript {
    pub fn ended(&self) -> bool {
        self.statuses.last() == Some(&Status::StreamEnd)
    }

    /// Compact one-line summary, with runs of `Ok` collapsed.
    pub fn trace(&self) -> String {
        let mut trace = String::new();
        let mut last = None;

        for status in &self.statuses {
            if *status == Status::Ok && last == Some(Status::Ok) {
                continue;
            }
            if !trace.is_empty() {
                trace.push_str(" > ");
            }
            let _ = write!(trace, "{status:?}");
            last = Some(*status);
        }

        if let Some(err) = &self.error {
            if !trace.is_empty() {
                trace.push_str(" > ");
            }
            let _ = write!(trace, "Err({err:?})");
        }
        trace
    }
}

/// Decode `data`, feeding `in_chunk` bytes and draining `out_chunk` bytes
/// at a time.
///
/// # Panics
///
/// If either chunk size is zero, or the decoder neither finishes nor
/// fails within a bounded number of calls.
pub fn decode_chunked<F: DelegateFactory>(
    decoder: &mut AutoDecoder<F>,
    data: &[u8],
    in_chunk: usize,
    out_chunk: usize,
) -> Transcript {
    assert!(in_chunk > 0 && out_chunk > 0, "chunk sizes must be non-zero");

    let mut transcript = Transcript::default();
    let mut scratch = vec![0u8; out_chunk];
    let mut fed = 0;
    let mut pos = 0;

    for _ in 0..MAX_CALLS {
        if pos == fed && fed < data.len() {
            fed = (fed + in_chunk).min(data.len());
        }
        let action = if fed == data.len() {
            Action::Finish
        } else {
            Action::Run
        };

        let mut input = InBuf::with_pos(&data[..fed], pos);
        let mut output = OutBuf::new(&mut scratch);
        let result = decoder.advance(&mut input, &mut output, action);
        pos = input.pos();
        transcript.output.extend_from_slice(output.written());
        transcript.consumed = pos;

        match result {
            Ok(status) => {
                transcript.statuses.push(status);
                if status == Status::StreamEnd {
                    return transcript;
                }
            }
            Err(err) => {
                transcript.error = Some(err);
                return transcript;
            }
        }
    }

    panic!("decoder made no final progress after {MAX_CALLS} calls");
}

/// Decode `data` in a single buffer pair large enough for everything.
pub fn decode_all<F: DelegateFactory>(decoder: &mut AutoDecoder<F>, data: &[u8]) -> Transcript {
    decode_chunked(decoder, data, data.len().max(1), data.len().max(1) * 2)
}
