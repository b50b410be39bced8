//! Property tests over arbitrary first bytes, flag sets, payloads and
//! buffer sizes.

use lzauto_decoder::{AutoDecoder, DecoderConfig};
use lzauto_tests::{ReferenceFactory, container_unit, decode_all, decode_chunked, legacy_unit};
use lzauto_wire::{Action, CheckKind, CodecError, DecoderFlags, Format, InBuf, OutBuf, Status};
use proptest::prelude::*;

fn supported_flags() -> impl Strategy<Value = DecoderFlags> {
    (0u32..=DecoderFlags::SUPPORTED.raw()).prop_map(DecoderFlags::from_raw)
}

fn flags_without_concatenation() -> impl Strategy<Value = DecoderFlags> {
    supported_flags().prop_map(|f| DecoderFlags::from_raw(f.raw() & !DecoderFlags::CONCATENATED.raw()))
}

fn auto(flags: DecoderFlags) -> AutoDecoder<ReferenceFactory> {
    let config = DecoderConfig::default().with_flags(flags);
    AutoDecoder::new(ReferenceFactory::new(), config).expect("supported flags")
}

proptest! {
    #[test]
    fn first_byte_alone_decides_the_format(
        first in any::<u8>(),
        rest in prop::collection::vec(any::<u8>(), 0..16),
        flags in supported_flags(),
    ) {
        let mut dec = auto(flags);
        let mut data = vec![first];
        data.extend_from_slice(&rest);
        let mut out = [0u8; 32];

        let mut input = InBuf::new(&data);
        let mut output = OutBuf::new(&mut out);
        let _ = dec.advance(&mut input, &mut output, Action::Run);

        let expected = if first == 0xFD { Format::Container } else { Format::Legacy };
        prop_assert_eq!(dec.format(), Some(expected));
        prop_assert_eq!(&dec.factory().created, &vec![expected]);
    }

    #[test]
    fn unknown_flag_bits_are_always_rejected(raw in any::<u32>()) {
        prop_assume!(raw & !DecoderFlags::SUPPORTED.raw() != 0);

        let config = DecoderConfig::default().with_flags(DecoderFlags::from_raw(raw));
        let result = AutoDecoder::new(ReferenceFactory::new(), config);

        prop_assert_eq!(result.err(), Some(CodecError::Options { flags: raw }));
    }

    #[test]
    fn empty_input_before_classification_changes_nothing(
        flags in supported_flags(),
        calls in prop::collection::vec(any::<bool>(), 1..20),
    ) {
        let mut dec = auto(flags);
        let mut out = [0u8; 8];

        for finish in calls {
            let action = if finish { Action::Finish } else { Action::Run };
            let mut input = InBuf::new(&[]);
            let mut output = OutBuf::new(&mut out);
            prop_assert_eq!(dec.advance(&mut input, &mut output, action), Ok(Status::Ok));
            prop_assert!(output.written().is_empty());
        }

        prop_assert_eq!(dec.format(), None);
        prop_assert!(dec.factory().created.is_empty());
    }

    #[test]
    fn stream_end_passes_through_without_concatenation(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        trailing in prop::collection::vec(any::<u8>(), 0..16),
        flags in flags_without_concatenation(),
    ) {
        let unit = legacy_unit(0x5D, &payload);
        let data = [unit.as_slice(), trailing.as_slice()].concat();
        let mut dec = auto(flags);

        let t = decode_all(&mut dec, &data);

        prop_assert!(t.ended(), "trace: {}", t.trace());
        prop_assert_eq!(t.output, payload);
        prop_assert_eq!(t.consumed, unit.len());
    }

    #[test]
    fn trailing_bytes_after_concatenated_legacy_unit_are_data_error(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        trailing in prop::collection::vec(any::<u8>(), 1..16),
        flags in supported_flags(),
    ) {
        let data = [legacy_unit(0x5D, &payload), trailing.clone()].concat();
        let mut dec = auto(flags | DecoderFlags::CONCATENATED);

        let t = decode_all(&mut dec, &data);

        prop_assert_eq!(t.error, Some(CodecError::Data { trailing: trailing.len() }));
        prop_assert_eq!(t.output, payload);
    }

    #[test]
    fn concatenated_finish_state_waits_for_finish(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        runs in 1usize..10,
    ) {
        let data = legacy_unit(0x00, &payload);
        let mut dec = auto(DecoderFlags::CONCATENATED);
        let mut out = [0u8; 128];
        let mut input = InBuf::new(&data);
        let mut output = OutBuf::new(&mut out);

        for _ in 0..runs {
            prop_assert_eq!(dec.advance(&mut input, &mut output, Action::Run), Ok(Status::Ok));
        }
        prop_assert_eq!(dec.advance(&mut input, &mut output, Action::Finish), Ok(Status::StreamEnd));
        prop_assert_eq!(output.written(), payload.as_slice());
    }

    #[test]
    fn output_does_not_depend_on_buffer_sizes(
        payload in prop::collection::vec(any::<u8>(), 0..200),
        container in any::<bool>(),
        in_chunk in 1usize..24,
        out_chunk in 1usize..24,
        flags in supported_flags(),
    ) {
        let data = if container {
            container_unit(CheckKind::Crc32, &payload)
        } else {
            legacy_unit(0x5D, &payload)
        };
        let mut dec = auto(flags);

        let t = decode_chunked(&mut dec, &data, in_chunk, out_chunk);

        prop_assert!(t.ended(), "trace: {}", t.trace());
        prop_assert_eq!(t.output, payload);
        prop_assert_eq!(t.consumed, data.len());
        prop_assert!(t.statuses.iter().filter(|s| s.is_advisory()).count() <= 1);
    }
}
