//! Puzzle dates and the daily rollover boundary
//!
//! A puzzle day is a calendar date in a fixed UTC offset. Persisted state is
//! only trusted while its stored date equals today's date in that offset.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar day in the puzzle timezone, formatted `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleDate(NaiveDate);

impl PuzzleDate {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day, `None` if the date does not exist
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    /// Whole days from `earlier` to `self` (negative if `self` is earlier)
    #[must_use]
    pub fn days_since(self, earlier: Self) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    #[must_use]
    pub fn next_day(self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl fmt::Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for PuzzleDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

/// Source of "today" in the puzzle timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
    pinned: Option<PuzzleDate>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// Calendar for a fixed offset east of UTC, in minutes
    ///
    /// Offsets outside +/-24h fall back to UTC.
    #[must_use]
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
            log::warn!("invalid UTC offset of {minutes} minutes, using UTC");
            utc_offset()
        });
        Self {
            offset,
            pinned: None,
        }
    }

    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: utc_offset(),
            pinned: None,
        }
    }

    /// Calendar that always reports `date` as today
    #[must_use]
    pub fn pinned(date: PuzzleDate) -> Self {
        Self {
            offset: utc_offset(),
            pinned: Some(date),
        }
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Today's puzzle date
    #[must_use]
    pub fn today(&self) -> PuzzleDate {
        self.pinned.unwrap_or_else(|| self.date_at(Utc::now()))
    }

    /// Puzzle date at an instant
    #[must_use]
    pub fn date_at(&self, instant: DateTime<Utc>) -> PuzzleDate {
        PuzzleDate(instant.with_timezone(&self.offset).date_naive())
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_round_trips_through_string() {
        let date: PuzzleDate = "2025-08-23".parse().unwrap();
        assert_eq!(date.to_string(), "2025-08-23");
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            "\"2025-08-23\""
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!("2025-13-01".parse::<PuzzleDate>().is_err());
        assert!("yesterday".parse::<PuzzleDate>().is_err());
    }

    #[test]
    fn rollover_follows_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 23, 30, 0).unwrap();
        assert_eq!(
            Calendar::utc().date_at(instant),
            PuzzleDate::from_ymd(2025, 3, 1).unwrap()
        );
        // One hour east of UTC the day has already turned over
        assert_eq!(
            Calendar::with_offset_minutes(60).date_at(instant),
            PuzzleDate::from_ymd(2025, 3, 2).unwrap()
        );
        assert_eq!(
            Calendar::with_offset_minutes(-300).date_at(instant),
            PuzzleDate::from_ymd(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn pinned_calendar_reports_fixed_day() {
        let date = PuzzleDate::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(Calendar::pinned(date).today(), date);
    }

    #[test]
    fn days_between_dates() {
        let a = PuzzleDate::from_ymd(2025, 1, 1).unwrap();
        let b = PuzzleDate::from_ymd(2025, 2, 1).unwrap();
        assert_eq!(b.days_since(a), 31);
        assert_eq!(a.days_since(b), -31);
        assert_eq!(a.next_day(), PuzzleDate::from_ymd(2025, 1, 2).unwrap());
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        assert_eq!(
            Calendar::with_offset_minutes(100_000).offset(),
            Calendar::utc().offset()
        );
    }
}
