//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use gnomon_core::clock::{TickUnits, WallClock};
use gnomon_core::face::{BatteryReading, TickGranularity, VibePattern};
use gnomon_core::options::Options;
use gnomon_protocol::{OptionUpdate, WatchMessage};

/// Channel capacity for face events
const FACE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for vibration patterns
const VIBE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound companion-link messages
const OUTBOUND_CHANNEL_SIZE: usize = 4;

/// One event for the face task
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    /// Tick from the shared timer, tagged with the granularity it was
    /// produced under
    Tick {
        clock: WallClock,
        units: TickUnits,
        granularity: TickGranularity,
    },
    /// Battery sample changed
    Battery(BatteryReading),
    /// Companion-link connectivity changed
    Connection(bool),
    /// Option update received from the companion
    Update(OptionUpdate),
    /// The deferred clock resync fired
    Resync,
}

/// Events feeding the face task
pub static FACE_EVENTS: Channel<CriticalSectionRawMutex, FaceEvent, FACE_CHANNEL_SIZE> =
    Channel::new();

/// Requested tick granularity; the tick task tears down and re-arms its
/// timer whenever this fires
pub static TICK_MODE: Signal<CriticalSectionRawMutex, TickGranularity> = Signal::new();

/// Vibration patterns for the motor task
pub static VIBES: Channel<CriticalSectionRawMutex, VibePattern, VIBE_CHANNEL_SIZE> =
    Channel::new();

/// Outbound messages for the companion link
pub static OUTBOUND: Channel<CriticalSectionRawMutex, WatchMessage, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a heartbeat (PING) was received from the companion
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal to arm the deferred clock-resync one-shot
pub static RESYNC_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Options snapshots to persist to flash
pub static SAVE_OPTIONS: Channel<CriticalSectionRawMutex, Options, 2> = Channel::new();
