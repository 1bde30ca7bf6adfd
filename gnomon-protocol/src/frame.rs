//! Frame encoding and decoding for the companion link.
//!
//! Frame format:
//! - START (1 byte): 0xA7 synchronization byte
//! - LENGTH (1 byte): payload length (0-92)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-92 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes
//!
//! The payload limit keeps a complete frame inside the fixed 96-byte
//! sync buffer each side allocates for the link.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA7;

/// Fixed buffer size per link direction
pub const SYNC_BUFFER_SIZE: usize = 96;

/// Maximum payload size in bytes (buffer minus START, LENGTH, TYPE, CHECKSUM)
pub const MAX_PAYLOAD_SIZE: usize = SYNC_BUFFER_SIZE - 4;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
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

    /// Calculate checksum over LENGTH, TYPE and payload
    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload
            .iter()
            .fold(length ^ msg_type, |acc, &byte| acc ^ byte)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 4 + self.payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;

        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..3 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[3 + self.payload.len()] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec sized for the sync buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8, SYNC_BUFFER_SIZE>, FrameError> {
        let mut buffer = [0u8; SYNC_BUFFER_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Incremental parser for frames arriving byte-by-byte from the link
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    msg_type: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Scanning for the START byte
    Sync,
    /// Got START, expecting LENGTH
    Length,
    /// Got LENGTH, expecting TYPE
    Type,
    /// Accumulating payload bytes
    Payload,
    /// Expecting CHECKSUM
    Checksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            payload: Vec::new(),
            expected_length: 0,
            msg_type: 0,
        }
    }

    /// Reset the parser to scan for the next START byte
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
        self.expected_length = 0;
        self.msg_type = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser has already resynchronized itself.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                // Non-START bytes are line noise, skip them
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.expected_length = byte;
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.payload.clear();
                self.state = if self.expected_length == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Cannot overflow: expected_length is bounded by MAX_PAYLOAD_SIZE
                let _ = self.payload.push(byte);
                if self.payload.len() == self.expected_length as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected =
                    Frame::checksum(self.expected_length, self.msg_type, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.payload.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any. Bytes after a
    /// complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_empty_payload() {
        let frame = Frame::empty(0x02);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 0); // length
        assert_eq!(buffer[2], 0x02); // type
        assert_eq!(buffer[3], 0x02); // checksum (0 ^ 0x02)
    }

    #[test]
    fn encode_with_payload() {
        let frame = Frame::new(0x01, &[0x03, 0x01]).unwrap();
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 6);
        assert_eq!(buffer[1], 2); // length
        assert_eq!(buffer[2], 0x01); // type
        assert_eq!(buffer[3], 0x03); // key
        assert_eq!(buffer[4], 0x01); // value
        assert_eq!(buffer[5], 2 ^ 0x01 ^ 0x03 ^ 0x01); // checksum
    }

    #[test]
    fn roundtrip() {
        let original = Frame::new(0x21, &[1, 2, 3, 4, 5]).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn frame_fits_sync_buffer() {
        let payload = [0u8; MAX_PAYLOAD_SIZE];
        let frame = Frame::new(0x21, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(encoded.len(), SYNC_BUFFER_SIZE);
    }

    #[test]
    fn rejects_oversized_payload() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x21, &payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn parser_rejects_bad_checksum() {
        let frame = Frame::new(0x01, &[0x00, 0x01]).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(
            parser.feed_bytes(&encoded),
            Err(FrameError::InvalidChecksum)
        );
    }

    #[test]
    fn parser_resyncs_after_garbage() {
        let frame = Frame::empty(0x20);
        let encoded = frame.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 32>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x55]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x20);
    }

    #[test]
    fn parser_recovers_after_error() {
        let mut parser = FrameParser::new();

        // Length byte beyond the payload limit aborts the frame
        let result = parser.feed_bytes(&[FRAME_START, 0xFF]);
        assert_eq!(result, Err(FrameError::InvalidFrame));

        // A valid frame right after is parsed fine
        let frame = Frame::empty(0x02);
        let encoded = frame.encode_to_vec().unwrap();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x02);
    }
}
