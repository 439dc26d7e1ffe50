//! Error types for calendar and civil-time conversions.

use thiserror::Error;

/// Errors from parsing or converting civil timestamps.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Civil timestamp text did not match `YYYY-MM-DD HH:MM[:SS]`.
    #[error("invalid civil time '{0}': expected YYYY-MM-DD HH:MM:SS")]
    Parse(String),
    /// A calendar field is outside its valid range.
    #[error("calendar field out of range: {0}")]
    FieldOutOfRange(&'static str),
    /// UTC offset is not finite or exceeds ±14 hours.
    #[error("invalid UTC offset: {0} hours")]
    InvalidOffset(f64),
    /// Julian Day is NaN or infinite.
    #[error("Julian Day is not finite")]
    NonFiniteJd,
}
