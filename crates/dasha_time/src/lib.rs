//! Calendar and civil-time conversions for dasha period boundaries.
//!
//! This crate provides:
//! - Julian Day ↔ proleptic Gregorian calendar conversions
//! - `UtcOffset` and `CivilTime` for fixed-offset local timestamps
//! - Whole-second formatting with the seconds-field clamp (60 → 59)
//!
//! Instants are plain `f64` Julian Days (UT). Leap seconds are not modelled.

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{
    CivilTime, MAX_UTC_OFFSET_HOURS, UtcOffset, format_local, jd_from_local, jd_to_local,
};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, days_in_month, is_leap_year, jd_to_calendar,
};
