//! Wall-clock time
//!
//! The build script embeds the UTC epoch at build time; the wall clock is
//! that epoch advanced by the monotonic uptime. A connected companion is
//! expected to push corrections through its own channel eventually; until
//! then a reflash resets the clock.

use chrono::{DateTime, Datelike, Timelike};
use embassy_time::Instant;

use gnomon_core::clock::{ClockStyle, WallClock};

include!(concat!(env!("OUT_DIR"), "/utc.rs"));

/// Hour style of the face; the hardware has no locale source
pub const CLOCK_STYLE: ClockStyle = ClockStyle::H24;

/// Current wall-clock reading
pub fn now() -> WallClock {
    let seconds = UTC_TIME + Instant::now().as_secs() as i64;
    let t = DateTime::from_timestamp(seconds, 0).unwrap_or_default();
    WallClock {
        hour: t.hour() as u8,
        minute: t.minute() as u8,
        second: t.second() as u8,
        day: t.day() as u8,
        month: t.month0() as u8,
        weekday: t.weekday().num_days_from_sunday() as u8,
    }
}
