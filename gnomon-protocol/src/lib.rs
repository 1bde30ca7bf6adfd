//! Companion-link sync protocol for the Gnomon watchface
//!
//! The paired phone application pushes display options to the watch as
//! (key, value) pairs and exchanges heartbeats over the same link. The
//! watch reports its current options once at startup so both sides agree
//! on the initial state.
//!
//! Both directions run over a small framed byte stream; each side owns a
//! fixed 96-byte buffer for it.

#![no_std]

pub mod frame;
pub mod messages;
pub mod options;

// Re-export key types
pub use frame::{Frame, FrameError, FrameParser, SYNC_BUFFER_SIZE};
pub use messages::{PhoneMessage, WatchMessage};
pub use options::{OptionKey, OptionUpdate};
