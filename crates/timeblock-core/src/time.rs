//! Quarter-hour time arithmetic and display formatting.
//!
//! All scheduling math works on local wall-clock times (`NaiveDateTime`).
//! Calendar days are identified by [`DayKey`], a date-only key that is
//! stable for every timestamp on the same local day.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour of the day where the first unlocked task is anchored.
pub const DAY_START_HOUR: u32 = 8;

/// Placeholder rendered for absent or unparseable times.
pub const CLOCK_PLACEHOLDER: &str = "--:--";

/// Identifier for one local calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Key for the current local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Key for the day a timestamp falls on. Two timestamps on the same
    /// local day always produce the same key.
    pub fn from_datetime(t: NaiveDateTime) -> Self {
        Self(t.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The key `delta` days away. Day offsets are calendar arithmetic on
    /// `NaiveDate`, so month and year boundaries carry correctly and no
    /// daylight-saving shift can move the result onto a neighboring day.
    pub fn add_days(&self, delta: i64) -> Self {
        Self(self.0.checked_add_signed(Duration::days(delta)).unwrap_or(self.0))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

fn hms(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// The scheduling anchor for a day: 08:00:00.000 local.
pub fn day_anchor(key: DayKey) -> NaiveDateTime {
    key.date().and_time(hms(DAY_START_HOUR, 0))
}

/// End-of-day sentinel (23:59) used when scanning for free slots.
pub fn day_end(key: DayKey) -> NaiveDateTime {
    key.date().and_time(hms(23, 59))
}

/// Round a duration up to the next multiple of 15 minutes.
///
/// Exact multiples are unchanged; anything at or below zero rounds to 15.
pub fn round_up_to_quarter_hour(minutes: i64) -> i64 {
    if minutes <= 0 {
        return 15;
    }
    let remainder = minutes % 15;
    if remainder == 0 {
        minutes
    } else {
        minutes + (15 - remainder)
    }
}

/// Round a clock time up to the next quarter hour.
///
/// 8:00 stays 8:00, 8:01 becomes 8:15, 8:37 becomes 8:45. Times already on
/// a quarter-hour boundary pass through unchanged.
pub fn round_time_up(t: NaiveDateTime) -> NaiveDateTime {
    let remainder = i64::from(t.minute() % 15);
    if remainder == 0 {
        return t;
    }
    t.date().and_time(hms(t.hour(), t.minute())) + Duration::minutes(15 - remainder)
}

/// Format a clock time as `8:00 AM` / `2:30 PM`.
pub fn format_clock(t: NaiveDateTime) -> String {
    let hour24 = t.hour();
    let meridiem = if hour24 >= 12 { "PM" } else { "AM" };
    let hour = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, t.minute(), meridiem)
}

/// Format an optional clock time, degrading to a visible placeholder so a
/// single bad record never breaks rendering of the rest of the schedule.
pub fn format_clock_opt(t: Option<NaiveDateTime>) -> String {
    match t {
        Some(t) => format_clock(t),
        None => CLOCK_PLACEHOLDER.to_string(),
    }
}

/// Format a duration as `30m`, `1h`, or `1h 30m`.
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if remaining == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {remaining}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn duration_rounding_law() {
        for minutes in [-30, 0, 1, 5, 14, 15, 16, 44, 45, 60, 61, 120] {
            let rounded = round_up_to_quarter_hour(minutes);
            assert_eq!(rounded % 15, 0, "{minutes} rounded to {rounded}");
            assert!(rounded >= minutes);
            assert!(rounded >= 15);
        }
        assert_eq!(round_up_to_quarter_hour(60), 60);
        assert_eq!(round_up_to_quarter_hour(61), 75);
    }

    #[test]
    fn time_rounding() {
        assert_eq!(round_time_up(at(2026, 3, 2, 8, 0)), at(2026, 3, 2, 8, 0));
        assert_eq!(round_time_up(at(2026, 3, 2, 8, 1)), at(2026, 3, 2, 8, 15));
        assert_eq!(round_time_up(at(2026, 3, 2, 8, 37)), at(2026, 3, 2, 8, 45));
        // Rolls over the hour boundary.
        assert_eq!(round_time_up(at(2026, 3, 2, 8, 50)), at(2026, 3, 2, 9, 0));
    }

    #[test]
    fn day_key_is_stable_across_the_day() {
        let morning = at(2026, 8, 5, 0, 1);
        let evening = at(2026, 8, 5, 23, 59);
        assert_eq!(DayKey::from_datetime(morning), DayKey::from_datetime(evening));
        assert_eq!(DayKey::from_datetime(morning).to_string(), "2026-08-05");
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        let end_of_year = DayKey::new(date(2025, 12, 31));
        assert_eq!(end_of_year.add_days(1).to_string(), "2026-01-01");

        let leap = DayKey::new(date(2024, 2, 28));
        assert_eq!(leap.add_days(1).to_string(), "2024-02-29");
        assert_eq!(leap.add_days(2).to_string(), "2024-03-01");

        let key = DayKey::new(date(2026, 3, 1));
        assert_eq!(key.add_days(-1).to_string(), "2026-02-28");
    }

    #[test]
    fn day_key_round_trips_through_string() {
        let key: DayKey = "2026-08-05".parse().unwrap();
        assert_eq!(key, DayKey::new(date(2026, 8, 5)));
        assert!("not-a-date".parse::<DayKey>().is_err());
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(at(2026, 1, 1, 8, 0)), "8:00 AM");
        assert_eq!(format_clock(at(2026, 1, 1, 14, 30)), "2:30 PM");
        assert_eq!(format_clock(at(2026, 1, 1, 0, 5)), "12:05 AM");
        assert_eq!(format_clock(at(2026, 1, 1, 12, 0)), "12:00 PM");
        assert_eq!(format_clock_opt(None), CLOCK_PLACEHOLDER);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(30), "30m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(-15), "0m");
    }

    #[test]
    fn anchor_and_sentinel() {
        let key = DayKey::new(date(2026, 8, 5));
        assert_eq!(day_anchor(key), at(2026, 8, 5, 8, 0));
        assert_eq!(day_end(key), at(2026, 8, 5, 23, 59));
    }
}
