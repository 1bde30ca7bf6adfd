//! Calendar and number text formatting
//!
//! All strings are fixed-capacity `heapless` buffers; numbers print
//! without a leading zero ("3", not "03").

use gnomon_core::clock::WallClock;
use heapless::String;

pub const WEEKDAY_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn push_number(out: &mut String<6>, number: u8) {
    let tens = number / 10;
    if tens != 0 {
        let _ = out.push((b'0' + tens) as char);
    }
    let _ = out.push((b'0' + number % 10) as char);
}

/// The centered number text, at most two digits
pub fn format_number(number: u8) -> String<6> {
    let mut out = String::new();
    push_number(&mut out, number % 100);
    out
}

/// Date text: month abbreviation plus day of month, e.g. "Jun 14"
pub fn format_date(clock: &WallClock) -> String<6> {
    let mut out = String::new();
    let _ = out.push_str(MONTH_ABBREV[clock.month as usize % 12]);
    let _ = out.push(' ');
    push_number(&mut out, clock.day.clamp(1, 31));
    out
}

/// Weekday text, e.g. "Sat"
pub fn format_weekday(clock: &WallClock) -> &'static str {
    WEEKDAY_ABBREV[clock.weekday as usize % 7]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(day: u8, month: u8, weekday: u8) -> WallClock {
        WallClock {
            hour: 10,
            minute: 30,
            second: 0,
            day,
            month,
            weekday,
        }
    }

    #[test]
    fn numbers_drop_the_leading_zero() {
        assert_eq!(format_number(0).as_str(), "0");
        assert_eq!(format_number(3).as_str(), "3");
        assert_eq!(format_number(10).as_str(), "10");
        assert_eq!(format_number(59).as_str(), "59");
    }

    #[test]
    fn date_text_combines_month_and_day() {
        assert_eq!(format_date(&on(14, 5, 0)).as_str(), "Jun 14");
        assert_eq!(format_date(&on(3, 0, 0)).as_str(), "Jan 3");
        assert_eq!(format_date(&on(31, 11, 0)).as_str(), "Dec 31");
    }

    #[test]
    fn weekday_text() {
        assert_eq!(format_weekday(&on(14, 5, 0)), "Sun");
        assert_eq!(format_weekday(&on(14, 5, 6)), "Sat");
    }
}
