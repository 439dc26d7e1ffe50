//! Error types for dasha calculations.

use dasha_time::TimeError;
use thiserror::Error;

/// Errors from birth-balance resolution and period-tree construction.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DashaError {
    /// Moon longitude is NaN or infinite.
    #[error("moon longitude is not finite")]
    NonFiniteLongitude,
    /// A Julian Day input is NaN or infinite.
    #[error("instant is not finite: {0}")]
    NonFiniteInstant(&'static str),
    /// Period duration is negative or not finite.
    #[error("invalid period duration: {0} years")]
    InvalidDuration(f64),
    /// Lord name did not match any of the nine Vimshottari lords.
    #[error("unknown dasha lord '{0}'")]
    UnknownLord(String),
    /// Error from civil-time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
