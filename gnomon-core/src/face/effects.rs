//! Effects returned by the face controller
//!
//! Handlers never touch hardware; they return effects and the firmware
//! executes them synchronously, in order, before the next event is
//! dispatched.

use heapless::Vec;

/// Granularity of the shared tick timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickGranularity {
    /// One tick per minute rollover
    PerMinute,
    /// One tick per second, used for the charge blink
    PerSecond,
}

/// Haptic feedback patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibePattern {
    Short,
    Long,
    Double,
}

/// One side effect requested by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Tear down the tick timer and re-arm it at the given granularity,
    /// even when the granularity did not change
    RetickTimer(TickGranularity),
    /// Run a vibration pattern
    Vibrate(VibePattern),
    /// Redraw the hand layer (number and calendar included)
    Redraw,
    /// Update only the centered number text
    RefreshNumber,
    /// Update the date and weekday texts
    RefreshCalendar,
    /// Start or stop delivering link-connectivity events to the face
    WatchConnectivity(bool),
    /// Start or stop delivering battery events to the face
    WatchBattery(bool),
    /// Persist all option slots
    SaveOptions,
    /// Arm the deferred clock-resync one-shot (fires a forced calendar
    /// refresh after the settle delay)
    ScheduleResync,
}

/// Effect list returned by one handler invocation
pub type Effects = Vec<Effect, 8>;
