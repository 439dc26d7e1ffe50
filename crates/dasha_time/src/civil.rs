//! Local civil timestamps under a fixed UTC offset.
//!
//! `CivilTime` is the presentation form of a Julian Day (UT). Conversion is
//! whole-second: the seconds field is rounded to the nearest second, and a
//! rounded value of 60 is clamped to 59 instead of carrying into the minute.
//! That keeps a boundary timestamp within one second of its instant.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, days_in_month, jd_to_calendar};

/// Largest accepted offset magnitude (UTC+14 is the easternmost zone).
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// 0.1 ms nudge applied before splitting a day fraction, so a whole-second
/// instant stored as JD (resolution ~50 µs near the present) does not floor
/// into the previous minute.
const SPLIT_SLACK_DAYS: f64 = 1e-4 / SECONDS_PER_DAY;

/// A fixed offset from UTC, in hours (east positive, e.g. 5.5 for IST).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct UtcOffset {
    hours: f64,
}

impl UtcOffset {
    /// UTC itself.
    pub const UTC: Self = Self { hours: 0.0 };

    /// Create an offset, rejecting non-finite values and anything beyond ±14h.
    pub fn from_hours(hours: f64) -> Result<Self, TimeError> {
        if !hours.is_finite() || hours.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(TimeError::InvalidOffset(hours));
        }
        Ok(Self { hours })
    }

    pub fn hours(self) -> f64 {
        self.hours
    }

    /// Offset expressed as a fraction of a day.
    pub fn as_days(self) -> f64 {
        self.hours / 24.0
    }
}

/// Local calendar date and time, whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilTime {
    /// Create a validated civil time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::FieldOutOfRange("month"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::FieldOutOfRange("day"));
        }
        if hour > 23 {
            return Err(TimeError::FieldOutOfRange("hour"));
        }
        if minute > 59 {
            return Err(TimeError::FieldOutOfRange("minute"));
        }
        if second > 59 {
            return Err(TimeError::FieldOutOfRange("second"));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Convert this local time to a Julian Day (UT).
    pub fn to_jd(&self, offset: UtcOffset) -> f64 {
        jd_from_local(self, offset)
    }
}

/// Convert a local civil time at `offset` to a Julian Day (UT).
pub fn jd_from_local(civil: &CivilTime, offset: UtcOffset) -> f64 {
    let day_frac = civil.day as f64
        + civil.hour as f64 / 24.0
        + civil.minute as f64 / 1440.0
        + civil.second as f64 / SECONDS_PER_DAY
        - offset.as_days();
    calendar_to_jd(civil.year, civil.month, day_frac)
}

/// Convert a Julian Day (UT) to local civil time at `offset`.
///
/// Seconds are rounded; a rounded 60 becomes 59 with no carry, and minute or
/// hour overflow is clamped the same way. The result is at most one second
/// away from `jd`.
pub fn jd_to_local(jd: f64, offset: UtcOffset) -> Result<CivilTime, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFiniteJd);
    }
    let (year, month, day_frac) = jd_to_calendar(jd + offset.as_days() + SPLIT_SLACK_DAYS);
    let day = day_frac.floor() as u32;
    let total_seconds = day_frac.fract() * SECONDS_PER_DAY;

    let hour = (total_seconds / 3600.0).floor() as u32;
    let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
    let second = (total_seconds % 60.0).round() as u32;

    Ok(CivilTime {
        year,
        month,
        day,
        hour: hour.min(23),
        minute: minute.min(59),
        second: second.min(59),
    })
}

/// Format a Julian Day as `YYYY-MM-DD HH:MM:SS` local time.
pub fn format_local(jd: f64, offset: UtcOffset) -> Result<String, TimeError> {
    jd_to_local(jd, offset).map(|c| c.to_string())
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for CivilTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`. Seconds are
    /// optional and a trailing `Z` is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeError::Parse(s.to_string());
        let trimmed = s.trim().trim_end_matches('Z');
        let (date, time) = trimmed.split_once(['T', ' ']).ok_or_else(err)?;

        let date_parts: Vec<&str> = date.split('-').collect();
        let time_parts: Vec<&str> = time.trim().split(':').collect();
        if date_parts.len() != 3 || !(2..=3).contains(&time_parts.len()) {
            return Err(err());
        }

        let year: i32 = date_parts[0].parse().map_err(|_| err())?;
        let month: u32 = date_parts[1].parse().map_err(|_| err())?;
        let day: u32 = date_parts[2].parse().map_err(|_| err())?;
        let hour: u32 = time_parts[0].parse().map_err(|_| err())?;
        let minute: u32 = time_parts[1].parse().map_err(|_| err())?;
        let second: u32 = match time_parts.get(2) {
            Some(sec) => sec.parse().map_err(|_| err())?,
            None => 0,
        };
        Self::new(year, month, day, hour, minute, second)
    }
}

impl Serialize for CivilTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
