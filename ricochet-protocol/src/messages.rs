//! Message types for the decoder link
//!
//! - Host → decoder: bring-up commands and page reads
//! - Decoder → host: status replies, batch counts, pages
//!
//! Multi-byte integers are little-endian.

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: host → decoder
pub const MSG_BEGIN_FSK: u8 = 0x10;
pub const MSG_BEGIN_PAGER: u8 = 0x11;
pub const MSG_START_RECEIVE: u8 = 0x12;
pub const MSG_READ_PAGE: u8 = 0x13;

// Message type IDs: decoder → host
pub const MSG_STATUS: u8 = 0x81;
pub const MSG_BATCHES: u8 = 0x82;
pub const MSG_PAGE: u8 = 0x83;
pub const MSG_DECODE_FAILED: u8 = 0x84;

/// Longest page text carried in one frame
pub const MAX_PAGE_TEXT: usize = 128;

const _: () = assert!(4 + MAX_PAGE_TEXT <= MAX_PAYLOAD_SIZE);

/// Messages from the host to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Bring up the transceiver in FSK mode
    BeginFsk,
    /// Configure the POCSAG layer
    BeginPager { frequency_hz: u32, baud: u16 },
    /// Start receiving; mask 0 accepts every address
    StartReceive { address: u32, mask: u32 },
    /// Decode the buffered batches
    ReadPage,
}

impl HostMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            HostMessage::BeginFsk => Ok(Frame::empty(MSG_BEGIN_FSK)),
            HostMessage::BeginPager { frequency_hz, baud } => {
                let mut payload = [0u8; 6];
                payload[..4].copy_from_slice(&frequency_hz.to_le_bytes());
                payload[4..].copy_from_slice(&baud.to_le_bytes());
                Frame::new(MSG_BEGIN_PAGER, &payload)
            }
            HostMessage::StartReceive { address, mask } => {
                let mut payload = [0u8; 8];
                payload[..4].copy_from_slice(&address.to_le_bytes());
                payload[4..].copy_from_slice(&mask.to_le_bytes());
                Frame::new(MSG_START_RECEIVE, &payload)
            }
            HostMessage::ReadPage => Ok(Frame::empty(MSG_READ_PAGE)),
        }
    }

    /// Parse a host message (decoder side and simulation)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        match frame.msg_type {
            MSG_BEGIN_FSK => Ok(HostMessage::BeginFsk),
            MSG_BEGIN_PAGER if p.len() == 6 => Ok(HostMessage::BeginPager {
                frequency_hz: read_u32(&p[..4]),
                baud: u16::from_le_bytes([p[4], p[5]]),
            }),
            MSG_START_RECEIVE if p.len() == 8 => Ok(HostMessage::StartReceive {
                address: read_u32(&p[..4]),
                mask: read_u32(&p[4..]),
            }),
            MSG_READ_PAGE => Ok(HostMessage::ReadPage),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Messages from the decoder to the host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderMessage {
    /// Reply to a bring-up command; 0 is success
    Status { code: i16 },
    /// Buffered batch count changed
    Batches { count: u8 },
    /// Decoded page
    Page {
        address: u32,
        text: String<MAX_PAGE_TEXT>,
    },
    /// `ReadPage` could not decode the buffered data
    DecodeFailed { code: i16 },
}

impl DecoderMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        match frame.msg_type {
            MSG_STATUS if p.len() == 2 => Ok(DecoderMessage::Status {
                code: i16::from_le_bytes([p[0], p[1]]),
            }),
            MSG_BATCHES if p.len() == 1 => Ok(DecoderMessage::Batches { count: p[0] }),
            MSG_PAGE if p.len() >= 4 => Ok(DecoderMessage::Page {
                address: read_u32(&p[..4]),
                text: page_text(&p[4..]),
            }),
            MSG_DECODE_FAILED if p.len() == 2 => Ok(DecoderMessage::DecodeFailed {
                code: i16::from_le_bytes([p[0], p[1]]),
            }),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this message into a frame (decoder side and simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DecoderMessage::Status { code } => Frame::new(MSG_STATUS, &code.to_le_bytes()),
            DecoderMessage::Batches { count } => Frame::new(MSG_BATCHES, &[*count]),
            DecoderMessage::Page { address, text } => {
                let mut payload = heapless::Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&address.to_le_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(text.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_PAGE, &payload)
            }
            DecoderMessage::DecodeFailed { code } => {
                Frame::new(MSG_DECODE_FAILED, &code.to_le_bytes())
            }
        }
    }
}

/// Decode page text lossily, keeping whole chars up to `MAX_PAGE_TEXT` bytes
///
/// Radio noise can corrupt text; a page with a bad byte or a long body
/// still gets delivered.
fn page_text(bytes: &[u8]) -> String<MAX_PAGE_TEXT> {
    let mut text = String::new();
    for chunk in bytes.utf8_chunks() {
        let replacement = (!chunk.invalid().is_empty()).then_some(char::REPLACEMENT_CHARACTER);
        for c in chunk.valid().chars().chain(replacement) {
            if text.push(c).is_err() {
                return text;
            }
        }
    }
    text
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameParser;

    #[test]
    fn test_begin_pager_layout() {
        let frame = HostMessage::BeginPager {
            frequency_hz: 439_991_900,
            baud: 1200,
        }
        .to_frame()
        .unwrap();

        assert_eq!(frame.msg_type, MSG_BEGIN_PAGER);
        assert_eq!(&frame.payload[..4], &439_991_900u32.to_le_bytes());
        assert_eq!(&frame.payload[4..], &[0xB0, 0x04]);
    }

    #[test]
    fn test_host_messages_parse_back() {
        let messages = [
            HostMessage::BeginFsk,
            HostMessage::BeginPager {
                frequency_hz: 439_991_900,
                baud: 512,
            },
            HostMessage::StartReceive {
                address: 200,
                mask: 0,
            },
            HostMessage::ReadPage,
        ];
        for msg in messages {
            let frame = msg.to_frame().unwrap();
            assert_eq!(HostMessage::from_frame(&frame), Ok(msg));
        }
    }

    #[test]
    fn test_page_over_the_wire() {
        let page = DecoderMessage::Page {
            address: 1067,
            text: String::try_from("Hello").unwrap(),
        };
        let bytes = page.to_frame().unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let (frame, _) = parser.feed_bytes(&bytes).unwrap();
        let parsed = DecoderMessage::from_frame(&frame.unwrap()).unwrap();

        assert_eq!(parsed, page);
    }

    #[test]
    fn test_negative_codes() {
        let frame = Frame::new(MSG_DECODE_FAILED, &(-707i16).to_le_bytes()).unwrap();
        assert_eq!(
            DecoderMessage::from_frame(&frame),
            Ok(DecoderMessage::DecodeFailed { code: -707 })
        );
    }

    fn page_frame(address: u32, text: &[u8]) -> Frame {
        let mut payload = heapless::Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        payload.extend_from_slice(&address.to_le_bytes()).unwrap();
        payload.extend_from_slice(text).unwrap();
        Frame::new(MSG_PAGE, &payload).unwrap()
    }

    fn page_text_of(frame: &Frame) -> String<MAX_PAGE_TEXT> {
        match DecoderMessage::from_frame(frame).unwrap() {
            DecoderMessage::Page { text, .. } => text,
            other => panic!("expected page, got {:?}", other),
        }
    }

    #[test]
    fn test_long_page_truncated() {
        let text = page_text_of(&page_frame(1067, &[b'x'; 150]));
        assert_eq!(text.len(), MAX_PAGE_TEXT);
        assert!(text.bytes().all(|b| b == b'x'));

        // A two-byte char straddling the limit is dropped whole
        let mut body = [b'x'; MAX_PAGE_TEXT + 1];
        body[MAX_PAGE_TEXT - 1..].copy_from_slice("é".as_bytes());
        let text = page_text_of(&page_frame(1067, &body));
        assert_eq!(text.len(), MAX_PAGE_TEXT - 1);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let text = page_text_of(&page_frame(1, b"Hi\xFF!"));
        assert_eq!(text.as_str(), "Hi\u{FFFD}!");
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let short_status = Frame::new(MSG_STATUS, &[0]).unwrap();
        assert_eq!(
            DecoderMessage::from_frame(&short_status),
            Err(FrameError::InvalidFrame)
        );

        let unknown = Frame::empty(0x7F);
        assert_eq!(
            DecoderMessage::from_frame(&unknown),
            Err(FrameError::InvalidFrame)
        );
    }
}
