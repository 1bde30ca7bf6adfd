//! Message types for the companion link
//!
//! Message types are divided into two categories:
//! - Phone → Watch: option updates, heartbeat requests
//! - Watch → Phone: heartbeat responses, the startup options report

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::options::OptionKey;

// Message type IDs: Phone → Watch
pub const MSG_SET_OPTION: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Watch → Phone
pub const MSG_PONG: u8 = 0x20;
pub const MSG_OPTIONS_REPORT: u8 = 0x21;

/// Messages from the phone to the watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhoneMessage {
    /// Set one option to a new value
    ///
    /// The key is carried raw so the receiver can log unrecognized keys.
    SetOption { key: u8, value: u8 },
    /// Heartbeat request; link health is derived from these
    Ping,
}

impl PhoneMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_SET_OPTION => {
                if frame.payload.len() != 2 {
                    return Err(FrameError::InvalidFrame);
                }
                Ok(PhoneMessage::SetOption {
                    key: frame.payload[0],
                    value: frame.payload[1],
                })
            }
            MSG_PING => Ok(PhoneMessage::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this message into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PhoneMessage::SetOption { key, value } => Frame::new(MSG_SET_OPTION, &[*key, *value]),
            PhoneMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

/// Messages from the watch to the phone
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Heartbeat response
    Pong,
    /// Current value of every syncable option, sent once at startup
    ///
    /// Payload is a flat sequence of (key, value) pairs in key order.
    OptionsReport { values: [u8; 6] },
}

impl WatchMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            WatchMessage::Pong => Ok(Frame::empty(MSG_PONG)),
            WatchMessage::OptionsReport { values } => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                for (key, value) in OptionKey::ALL.iter().zip(values.iter()) {
                    payload
                        .push(key.as_u8())
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                    payload
                        .push(*value)
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                }
                Frame::new(MSG_OPTIONS_REPORT, &payload)
            }
        }
    }

    /// Parse a message from a frame (for testing or simulation)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PONG => Ok(WatchMessage::Pong),
            MSG_OPTIONS_REPORT => {
                if frame.payload.len() != 12 {
                    return Err(FrameError::InvalidFrame);
                }
                let mut values = [0u8; 6];
                for (i, pair) in frame.payload.chunks_exact(2).enumerate() {
                    if pair[0] != OptionKey::ALL[i].as_u8() {
                        return Err(FrameError::InvalidFrame);
                    }
                    values[i] = pair[1];
                }
                Ok(WatchMessage::OptionsReport { values })
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameParser;

    #[test]
    fn set_option_roundtrip() {
        let original = PhoneMessage::SetOption { key: 0x04, value: 1 };
        let frame = original.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_SET_OPTION);
        assert_eq!(PhoneMessage::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn ping_roundtrip() {
        let frame = PhoneMessage::Ping.to_frame().unwrap();
        assert!(frame.payload.is_empty());
        assert_eq!(PhoneMessage::from_frame(&frame).unwrap(), PhoneMessage::Ping);
    }

    #[test]
    fn set_option_requires_exact_payload() {
        let frame = Frame::new(MSG_SET_OPTION, &[0x01]).unwrap();
        assert_eq!(
            PhoneMessage::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn options_report_layout() {
        let msg = WatchMessage::OptionsReport {
            values: [1, 0, 1, 1, 0, 0],
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_OPTIONS_REPORT);
        assert_eq!(frame.payload.len(), 12);
        // First pair is (bluetooth_vibe key, value)
        assert_eq!(frame.payload[0], 0x00);
        assert_eq!(frame.payload[1], 1);
        assert_eq!(WatchMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn options_report_fits_one_frame() {
        let msg = WatchMessage::OptionsReport {
            values: [1, 1, 1, 1, 1, 1],
        };
        let encoded = msg.to_frame().unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.msg_type, MSG_OPTIONS_REPORT);
    }

    #[test]
    fn unknown_message_type_rejected() {
        let frame = Frame::empty(0x7F);
        assert_eq!(
            PhoneMessage::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }
}
