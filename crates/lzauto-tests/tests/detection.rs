//! Format detection and delegate lifecycle, driven through the
//! reference delegates.
//!
//! - **Selection**: a leading `0xFD` picks the container decoder with the
//!   caller's flags; anything else picks the legacy decoder with only the
//!   memory limit.
//! - **Forwarding**: once selected, the delegate's output and result reach
//!   the caller unchanged.
//! - **Lifecycle**: exactly one delegate per stream, dropped on release or
//!   reinit.

use lzauto_decoder::{AutoDecoder, DecoderConfig, DelegateFactory};
use lzauto_tests::{ReferenceFactory, container_unit, decode_all, decode_chunked, legacy_unit};
use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, Format, InBuf, OutBuf, Status};

fn auto(config: DecoderConfig) -> AutoDecoder<ReferenceFactory> {
    AutoDecoder::new(ReferenceFactory::new(), config).expect("valid config")
}

// ── Selection ────────────────────────────────────────────────────────────────

#[test]
fn container_stream_selects_container_decoder() {
    let flags = DecoderFlags::TELL_UNSUPPORTED_CHECK;
    let mut dec = auto(DecoderConfig::new(1 << 20, flags));

    let t = decode_all(&mut dec, &container_unit(CheckKind::Crc32, b"payload"));

    assert!(t.ended());
    assert_eq!(t.output, b"payload");
    assert_eq!(dec.format(), Some(Format::Container));
    assert_eq!(dec.factory().created, vec![Format::Container]);
    assert_eq!(dec.factory().container_flags, vec![flags]);
    assert_eq!(dec.factory().memlimits, vec![1 << 20]);
}

#[test]
fn legacy_stream_selects_legacy_decoder() {
    let mut dec = auto(DecoderConfig::new(1 << 20, DecoderFlags::CONCATENATED));

    let t = decode_all(&mut dec, &legacy_unit(0x5D, b"old format"));

    assert!(t.ended());
    assert_eq!(t.output, b"old format");
    assert_eq!(dec.format(), Some(Format::Legacy));
    assert_eq!(dec.factory().created, vec![Format::Legacy]);
    assert!(dec.factory().container_flags.is_empty());
    assert_eq!(dec.factory().memlimits, vec![1 << 20]);
}

#[test]
fn garbage_is_handed_to_legacy_decoder_which_rejects_it() {
    let mut dec = auto(DecoderConfig::default());

    let t = decode_all(&mut dec, b"\xFEnot a stream");

    assert_eq!(t.error, Some(CodecError::Format));
    assert_eq!(dec.format(), Some(Format::Legacy));
}

#[test]
fn lead_byte_without_full_magic_is_a_container_format_error() {
    let mut dec = auto(DecoderConfig::default());

    let t = decode_all(&mut dec, b"\xFD7zip?");

    assert_eq!(t.error, Some(CodecError::Format));
    assert_eq!(dec.format(), Some(Format::Container));
}

// ── Forwarding ───────────────────────────────────────────────────────────────

#[test]
fn container_output_matches_delegate_alone() {
    let data = container_unit(CheckKind::Crc64, b"same bytes either way");

    let mut factory = ReferenceFactory::new();
    let mut alone = factory
        .container(u64::MAX, DecoderFlags::NONE)
        .expect("reference delegate");
    let mut out = [0u8; 64];
    let mut input = InBuf::new(&data);
    let mut output = OutBuf::new(&mut out);
    let direct = alone.advance(&mut input, &mut output, Action::Finish);

    let mut dec = auto(DecoderConfig::default());
    let t = decode_all(&mut dec, &data);

    assert_eq!(direct, Ok(Status::StreamEnd));
    assert_eq!(t.statuses, vec![Status::StreamEnd]);
    assert_eq!(t.output, output.written());
    assert_eq!(t.consumed, input.pos());
}

#[test]
fn tiny_buffers_produce_identical_output() {
    let payload: Vec<u8> = (0..200u8).collect();

    for data in [
        legacy_unit(0x5D, &payload),
        container_unit(CheckKind::Sha256, &payload),
    ] {
        let mut dec = auto(DecoderConfig::default());
        let t = decode_chunked(&mut dec, &data, 1, 1);

        assert!(t.ended(), "trace: {}", t.trace());
        assert_eq!(t.output, payload);
        assert_eq!(t.consumed, data.len());
    }
}

#[test]
fn memlimit_error_from_delegate_is_forwarded() {
    let mut dec = auto(DecoderConfig::default().with_memlimit(1024));

    let t = decode_all(&mut dec, &legacy_unit(0x5D, b"x"));

    assert_eq!(t.error, Some(CodecError::MemLimit { limit: 1024 }));
}

#[test]
fn factory_failure_is_a_memory_error() {
    let factory = ReferenceFactory::failing(CodecError::Memory);
    let mut dec = AutoDecoder::new(factory, DecoderConfig::default()).unwrap();

    let t = decode_all(&mut dec, &container_unit(CheckKind::None, b"x"));

    assert_eq!(t.error, Some(CodecError::Memory));
    assert!(dec.factory().created.is_empty());
    assert_eq!(dec.format(), None);
}

// ── Check query ──────────────────────────────────────────────────────────────

#[test]
fn check_kind_follows_the_delegate() {
    let mut dec = auto(DecoderConfig::default());
    assert_eq!(dec.check(), CheckKind::None);

    decode_all(&mut dec, &container_unit(CheckKind::Crc64, b"abc"));
    assert_eq!(dec.check(), CheckKind::Crc64);

    dec.reinit(DecoderConfig::default()).unwrap();
    assert_eq!(dec.check(), CheckKind::None);

    decode_all(&mut dec, &legacy_unit(0x00, b"abc"));
    assert_eq!(dec.check(), CheckKind::None);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn one_delegate_per_stream_however_many_calls() {
    let mut dec = auto(DecoderConfig::default());
    let payload = [7u8; 100];

    let t = decode_chunked(&mut dec, &legacy_unit(0x5D, &payload), 3, 5);

    assert!(t.statuses.len() > 10);
    assert_eq!(dec.factory().created.len(), 1);
    assert_eq!(dec.factory().live.get(), 1);
}

#[test]
fn release_drops_the_delegate() {
    let factory = ReferenceFactory::new();
    let live = factory.live.clone();
    let mut dec = AutoDecoder::new(factory, DecoderConfig::default()).unwrap();

    decode_all(&mut dec, &container_unit(CheckKind::Crc32, b"abc"));
    assert_eq!(live.get(), 1);

    dec.release();
    assert_eq!(live.get(), 0);
}

#[test]
fn reinit_replaces_the_delegate() {
    let mut factory = ReferenceFactory::new();
    let mut dec = AutoDecoder::new(&mut factory, DecoderConfig::default()).unwrap();

    decode_all(&mut dec, &container_unit(CheckKind::Crc32, b"first"));
    dec.reinit(DecoderConfig::default().with_memlimit(1 << 30)).unwrap();
    assert_eq!(dec.format(), None);

    let t = decode_all(&mut dec, &legacy_unit(0x5D, b"second"));
    assert_eq!(t.output, b"second");
    drop(dec);

    assert_eq!(factory.created, vec![Format::Container, Format::Legacy]);
    assert_eq!(factory.memlimits, vec![u64::MAX, 1 << 30]);
    assert_eq!(factory.live.get(), 0);
}
