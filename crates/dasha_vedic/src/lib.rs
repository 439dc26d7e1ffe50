//! Vimshottari dasha period trees.
//!
//! This crate provides:
//! - The nine-lord cycle and its 120-year weights
//! - The 27 nakshatras and the Moon's position within them
//! - Birth balance, the recursive period tree and active-period queries
//! - Serializable records for rendering
//!
//! The only astronomical input is the Moon's sidereal longitude; computing
//! it (and choosing an ayanamsha) is the caller's job.

pub mod dasha;
pub mod error;
pub mod lord;
pub mod nakshatra;
pub mod util;

pub use dasha::{
    BirthContext, DashaConfig, DashaCycle, DashaLevel, DashaNode, DashaRecord, DashaSnapshot,
    SubtreeRequest, VimshottariReport, active_chain, build_level, compute_mahadashas,
    compute_subtree, dasha_cycle, find_active_period, resolve_birth_lord, vimshottari_report,
};
pub use error::DashaError;
pub use lord::{LORD_COUNT, LORD_CYCLE, LORD_YEARS, Lord, TOTAL_CYCLE_YEARS, lord_at, weight_of};
pub use nakshatra::{
    NAKSHATRA_COUNT, NAKSHATRA_NAMES, NAKSHATRA_SPAN_27, NakshatraPosition, nakshatra_name,
    nakshatra_position,
};
pub use util::normalize_360;
