#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lzauto_decoder::{AutoDecoder, DecoderConfig};
use lzauto_tests::{ReferenceFactory, decode_chunked};
use lzauto_wire::{CodecError, DecoderFlags};

// Fuzz target: the dispatcher over arbitrary bytes, flags and chunking.
//
// Catches bugs in:
// - Format detection on any first byte
// - Flag validation (reserved bits must be rejected, never masked)
// - Resumption after advisories and partial input/output
// - Trailing-data detection with CONCATENATED
// - Cursor bookkeeping (consumed never exceeds the input)
#[derive(Debug, Arbitrary)]
struct Session {
    flags: u32,
    in_chunk: u8,
    out_chunk: u8,
    data: Vec<u8>,
}

fuzz_target!(|session: Session| {
    let config = DecoderConfig::default().with_flags(DecoderFlags::from_raw(session.flags));
    let mut decoder = match AutoDecoder::new(ReferenceFactory::new(), config) {
        Ok(decoder) => decoder,
        Err(err) => {
            assert_eq!(err, CodecError::Options { flags: session.flags });
            assert_ne!(DecoderFlags::from_raw(session.flags).unsupported(), 0);
            return;
        }
    };

    // Empty input never classifies, so the session would never end.
    if session.data.is_empty() {
        return;
    }

    let in_chunk = usize::from(session.in_chunk.max(1));
    let out_chunk = usize::from(session.out_chunk.max(1));
    let t = decode_chunked(&mut decoder, &session.data, in_chunk, out_chunk);

    assert!(t.consumed <= session.data.len());
    assert!(t.output.len() <= session.data.len());
    assert!(t.ended() || t.error.is_some());
    assert!(decoder.factory().created.len() <= 1);
});
