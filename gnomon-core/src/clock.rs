//! Wall-clock time and tick-unit types
//!
//! The firmware derives these from its time source; host tests construct
//! them directly. `TickUnits` mirrors the "which fields rolled over since
//! the last tick" information the tick service hands to the face.

/// A local wall-clock reading, broken down the way the face consumes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minute of hour, 0-59
    pub minute: u8,
    /// Second of minute, 0-59
    pub second: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Month of year, 0-11
    pub month: u8,
    /// Day of week, 0-6 with 0 = Sunday
    pub weekday: u8,
}

impl WallClock {
    /// Hour of day in 12-hour form, 1-12
    pub fn hour_12(&self) -> u8 {
        (self.hour + 11) % 12 + 1
    }
}

/// Hour display style of the host locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// 12-hour clock, hours 1-12
    H12,
    /// 24-hour clock, hours 0-23
    H24,
}

/// Which clock fields rolled over between two consecutive ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickUnits {
    pub second: bool,
    pub minute: bool,
    pub hour: bool,
    pub day: bool,
}

impl TickUnits {
    /// No rollover
    pub const NONE: Self = Self {
        second: false,
        minute: false,
        hour: false,
        day: false,
    };

    /// Day rollover only - used to force a full calendar refresh
    pub const DAY: Self = Self {
        second: false,
        minute: false,
        hour: false,
        day: true,
    };

    /// Hour rollover only
    pub const HOUR: Self = Self {
        second: false,
        minute: false,
        hour: true,
        day: false,
    };

    /// Minute rollover only
    pub const MINUTE: Self = Self {
        second: false,
        minute: true,
        hour: false,
        day: false,
    };

    /// Compute which fields changed between two readings
    pub fn between(prev: &WallClock, now: &WallClock) -> Self {
        Self {
            second: prev.second != now.second,
            minute: prev.minute != now.minute,
            hour: prev.hour != now.hour,
            day: prev.day != now.day || prev.month != now.month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8, second: u8) -> WallClock {
        WallClock {
            hour,
            minute,
            second,
            day: 14,
            month: 5,
            weekday: 0,
        }
    }

    #[test]
    fn hour_12_wraps_midnight_and_noon() {
        assert_eq!(at(0, 0, 0).hour_12(), 12);
        assert_eq!(at(1, 0, 0).hour_12(), 1);
        assert_eq!(at(12, 0, 0).hour_12(), 12);
        assert_eq!(at(13, 0, 0).hour_12(), 1);
        assert_eq!(at(23, 0, 0).hour_12(), 11);
    }

    #[test]
    fn units_between_consecutive_seconds() {
        let units = TickUnits::between(&at(10, 30, 4), &at(10, 30, 5));
        assert!(units.second);
        assert!(!units.minute);
        assert!(!units.hour);
        assert!(!units.day);
    }

    #[test]
    fn units_between_hour_rollover() {
        let units = TickUnits::between(&at(10, 59, 59), &at(11, 0, 0));
        assert!(units.second);
        assert!(units.minute);
        assert!(units.hour);
        assert!(!units.day);
    }

    #[test]
    fn units_detect_day_change() {
        let mut prev = at(23, 59, 59);
        let mut now = at(0, 0, 0);
        prev.day = 14;
        now.day = 15;
        let units = TickUnits::between(&prev, &now);
        assert!(units.day);
        assert!(units.hour);
    }

    #[test]
    fn units_detect_month_change_as_day() {
        let mut prev = at(23, 59, 59);
        let mut now = at(0, 0, 0);
        prev.day = 31;
        prev.month = 0;
        now.day = 1;
        now.month = 1;
        assert!(TickUnits::between(&prev, &now).day);
    }
}
