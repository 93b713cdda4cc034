//! Week calendar: days, shift types, and date resolution.
//!
//! Defines the canonical week ordering used everywhere in the engine
//! (Monday through Sunday) and the mapping from a weekday to the nearest
//! upcoming calendar date.
//!
//! # Reference Date
//! Date resolution never reads the wall clock. Callers pass an explicit
//! reference date ("today"); the resolved date is 0-6 days ahead of it.
//! Convenience constructors on the generators read the clock once at the
//! boundary and inject it here.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week.
///
/// Ordering is canonical Monday..Sunday (see [`DayOfWeek::WEEK`]); the
/// "previous day" used by the night-fatigue penalty follows this ordering,
/// so Monday has no predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Canonical week ordering, Monday first.
    pub const WEEK: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Position within the canonical week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    /// The previous day in the canonical week, or `None` for Monday.
    #[inline]
    pub fn previous(self) -> Option<DayOfWeek> {
        self.index().checked_sub(1).map(|i| Self::WEEK[i])
    }

    /// The corresponding `chrono` weekday.
    pub fn weekday(self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }

    /// The nearest calendar date falling on this weekday, on or after
    /// `reference`.
    ///
    /// Returns `reference` itself when it already falls on this weekday,
    /// otherwise a date 1-6 days ahead.
    pub fn next_date_from(self, reference: NaiveDate) -> NaiveDate {
        let target = self.weekday().num_days_from_monday() as i64;
        let current = reference.weekday().num_days_from_monday() as i64;
        let days_ahead = (target - current).rem_euclid(7);
        reference + Duration::days(days_ahead)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        };
        f.write_str(name)
    }
}

/// A shift type within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Day,
    Night,
}

impl ShiftType {
    /// All shift types, in iteration order.
    pub const ALL: [ShiftType; 2] = [ShiftType::Day, ShiftType::Night];

    /// Position within [`ShiftType::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ShiftType::Day => 0,
            ShiftType::Night => 1,
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShiftType::Day => "day",
            ShiftType::Night => "night",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_ordering() {
        assert_eq!(DayOfWeek::WEEK[0], DayOfWeek::Monday);
        assert_eq!(DayOfWeek::WEEK[6], DayOfWeek::Sunday);
        for (i, day) in DayOfWeek::WEEK.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
    }

    #[test]
    fn test_previous_day() {
        assert_eq!(DayOfWeek::Monday.previous(), None);
        assert_eq!(DayOfWeek::Tuesday.previous(), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::Sunday.previous(), Some(DayOfWeek::Saturday));
    }

    #[test]
    fn test_next_date_same_day() {
        // 2025-06-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(DayOfWeek::Monday.next_date_from(monday), monday);
    }

    #[test]
    fn test_next_date_ahead() {
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(
            DayOfWeek::Wednesday.next_date_from(monday),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
        );
        assert_eq!(
            DayOfWeek::Sunday.next_date_from(monday),
            NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()
        );
    }

    #[test]
    fn test_next_date_wraps_week() {
        // 2025-06-06 is a Friday; the next Monday is 3 days ahead.
        let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        assert_eq!(
            DayOfWeek::Monday.next_date_from(friday),
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Wednesday).unwrap(),
            "\"wednesday\""
        );
        assert_eq!(serde_json::to_string(&ShiftType::Night).unwrap(), "\"night\"");
        let day: DayOfWeek = serde_json::from_str("\"sunday\"").unwrap();
        assert_eq!(day, DayOfWeek::Sunday);
    }
}
