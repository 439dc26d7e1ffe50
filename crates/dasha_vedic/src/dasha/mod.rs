//! Vimshottari dasha (planetary period) calculations.
//!
//! The computation runs in tiers:
//! - `balance`: Moon longitude to starting lord and elapsed years
//! - `vimshottari`: Mahadashas and recursive nine-way sub-periods
//! - `query`: active period at an instant, expanding only the active chain
//! - `record`: serde records with civil-time boundaries for renderers
//!
//! Every level is a half-open interval `[start_jd, end_jd)` in JD UT. Children
//! are built lazily; a node can be expanded later from its own interval.

pub mod balance;
pub mod cycle;
pub mod query;
pub mod record;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{BirthContext, nakshatra_lord, resolve_birth_lord};
pub use cycle::{DashaConfig, DashaCycle, dasha_cycle};
pub use query::{DashaSnapshot, active_chain, find_active_period};
pub use record::{
    DashaRecord, SubtreeRequest, VimshottariReport, dasha_records, vimshottari_report,
};
pub use subperiod::{proportional_children, snap_last_child_end};
pub use types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaNode, MAX_DASHA_DEPTH, days_to_years,
    years_to_days,
};
pub use vimshottari::{birth_mahadashas, build_level, compute_mahadashas, compute_subtree};
