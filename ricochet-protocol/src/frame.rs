//! Frame encoding and decoding for the decoder link.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): payload length (0-200)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-200 bytes): type-specific data
//! - CRC8 (1 byte): CRC-8 (poly 0x07, init 0x00) over LENGTH, TYPE and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 200;

/// Maximum complete frame size (START + LENGTH + TYPE + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidCrc,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Update a CRC-8 with `bytes`
pub fn crc8(mut crc: u8, bytes: &[u8]) -> u8 {
    for &byte in bytes {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            msg_type,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        crc8(crc8(0, &[length, msg_type]), payload)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.payload.len();
        let frame_len = 4 + len;
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = len as u8;
        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..3 + len].copy_from_slice(&self.payload);
        buffer[3 + len] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Streaming frame parser
///
/// Bytes outside a frame are skipped until the next START byte, so the
/// parser resynchronises by itself after line noise or a dropped byte.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    msg_type: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    WaitingForStart,
    WaitingForLength,
    WaitingForType,
    ReadingPayload,
    WaitingForCrc,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
            expected_length: 0,
            msg_type: 0,
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
        self.expected_length = 0;
        self.msg_type = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser is already waiting for the next frame.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForLength;
                }
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.expected_length = byte;
                self.state = ParseState::WaitingForType;
                Ok(None)
            }
            ParseState::WaitingForType => {
                self.msg_type = byte;
                self.buffer.clear();
                self.state = if self.expected_length == 0 {
                    ParseState::WaitingForCrc
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Length was bounded above, cannot overflow
                let _ = self.buffer.push(byte);
                if self.buffer.len() == usize::from(self.expected_length) {
                    self.state = ParseState::WaitingForCrc;
                }
                Ok(None)
            }
            ParseState::WaitingForCrc => {
                let expected = Frame::checksum(self.expected_length, self.msg_type, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidCrc);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.buffer),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame and how many bytes were consumed
    /// to produce it. Bytes after that frame are left for the caller.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(Option<Frame>, usize), FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.feed(byte)? {
                return Ok((Some(frame), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}
