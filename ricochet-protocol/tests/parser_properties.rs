//! Property tests for the streaming frame parser

use proptest::prelude::*;
use ricochet_protocol::{Frame, FrameError, FrameParser};

fn drain(parser: &mut FrameParser, bytes: &[u8]) -> Vec<Frame> {
    let mut frames = Vec::new();
    for &b in bytes {
        if let Ok(Some(frame)) = parser.feed(b) {
            frames.push(frame);
        }
    }
    frames
}

proptest! {
    #[test]
    fn prop_parser_finds_frame_after_noise(
        noise in prop::collection::vec(any::<u8>().prop_filter("not a start byte", |b| *b != 0xA5), 0..64),
        msg_type in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..=200),
    ) {
        let frame = Frame::new(msg_type, &payload).unwrap();
        let mut bytes = noise.clone();
        bytes.extend_from_slice(&frame.encode_to_vec().unwrap());

        let mut parser = FrameParser::new();
        let frames = drain(&mut parser, &bytes);

        prop_assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn prop_single_bit_flip_never_yields_wrong_frame(
        payload in prop::collection::vec(any::<u8>(), 1..32),
        bit in 0usize..8,
        pos_seed in any::<usize>(),
    ) {
        let frame = Frame::new(0x83, &payload).unwrap();
        let mut bytes = frame.encode_to_vec().unwrap().to_vec();
        // flip a bit in TYPE, PAYLOAD or CRC; LENGTH flips change framing
        let pos = 2 + pos_seed % (bytes.len() - 2);
        bytes[pos] ^= 1 << bit;

        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&bytes);
        prop_assert_eq!(result, Err(FrameError::InvalidCrc));
    }
}
