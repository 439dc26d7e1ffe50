//! Vimshottari period-tree builder.
//!
//! Three entry points, all pure and deterministic:
//! - `build_level`: partition a span of years into nine lords, recursively
//! - `compute_mahadashas`: the nine Mahadashas of one 120-year cycle
//! - `compute_subtree`: lazy expansion of an already-known period
//!
//! `birth_mahadashas` chains the birth balance into the first of these.
//!
//! Depth counts levels below the given span: depth 1 yields the nine
//! immediate sub-periods, depth 2 also fills each of their children, and so
//! on. Depth ≤ 0 yields nothing. Depth is capped at [`MAX_DASHA_DEPTH`].

use tracing::{debug, trace};

use crate::error::DashaError;
use crate::lord::{Lord, TOTAL_CYCLE_YEARS};

use super::balance::BirthContext;
use super::subperiod::proportional_children;
use super::types::{DashaNode, MAX_DASHA_DEPTH, days_to_years, years_to_days};

/// Partition `duration_years` starting at `start_jd` among the nine lords,
/// rotating from `start_lord_index`, down to `depth` levels.
///
/// Returns nine contiguous siblings spanning exactly `duration_years`, or an
/// empty list for `depth <= 0`. Each sibling's own children restart the
/// rotation at that sibling's lord.
pub fn build_level(
    start_jd: f64,
    duration_years: f64,
    depth: i32,
    start_lord_index: usize,
) -> Result<Vec<DashaNode>, DashaError> {
    if !start_jd.is_finite() {
        return Err(DashaError::NonFiniteInstant("start_jd"));
    }
    if !duration_years.is_finite() || duration_years < 0.0 {
        return Err(DashaError::InvalidDuration(duration_years));
    }
    let end_jd = start_jd + years_to_days(duration_years);
    Ok(partition(
        start_jd,
        end_jd,
        duration_years,
        capped_depth(depth),
        start_lord_index,
    ))
}

/// The nine Mahadashas of a full 120-year cycle beginning at `start_jd` with
/// `start_lord`. Children are not materialized.
pub fn compute_mahadashas(start_jd: f64, start_lord: Lord) -> Result<Vec<DashaNode>, DashaError> {
    build_level(start_jd, TOTAL_CYCLE_YEARS as f64, 1, start_lord.index())
}

/// Mahadashas of the cycle running at birth, pre-expanded to `depth` levels.
///
/// The first Mahadasha starts at `birth.start_jd`, i.e. before the birth
/// instant by the elapsed part of the starting lord's period.
pub fn birth_mahadashas(birth: &BirthContext, depth: i32) -> Result<Vec<DashaNode>, DashaError> {
    build_level(
        birth.start_jd,
        TOTAL_CYCLE_YEARS as f64,
        depth,
        birth.start_lord.index(),
    )
}

/// Expand the period `[start_jd, end_jd)` ruled by `lord` to `depth` levels.
///
/// Only the requested subtree is built; ancestors are never recomputed.
pub fn compute_subtree(
    start_jd: f64,
    end_jd: f64,
    depth: i32,
    lord: Lord,
) -> Result<Vec<DashaNode>, DashaError> {
    if !start_jd.is_finite() {
        return Err(DashaError::NonFiniteInstant("start_jd"));
    }
    if !end_jd.is_finite() {
        return Err(DashaError::NonFiniteInstant("end_jd"));
    }
    let duration_years = days_to_years(end_jd - start_jd);
    if duration_years < 0.0 {
        return Err(DashaError::InvalidDuration(duration_years));
    }
    trace!(
        start_jd,
        end_jd,
        depth,
        lord = lord.name(),
        "expanding dasha subtree"
    );
    Ok(partition(
        start_jd,
        end_jd,
        duration_years,
        capped_depth(depth),
        lord.index(),
    ))
}

/// Clamp a requested depth to [`MAX_DASHA_DEPTH`].
pub(crate) fn capped_depth(depth: i32) -> i32 {
    if depth > MAX_DASHA_DEPTH {
        debug!(requested = depth, max = MAX_DASHA_DEPTH, "dasha depth capped");
    }
    depth.min(MAX_DASHA_DEPTH)
}

/// Recursive worker. Children of each sibling are derived from the sibling's
/// final (snapped) interval, so an eagerly built tree is bit-identical to one
/// expanded node by node through `compute_subtree`.
fn partition(
    start_jd: f64,
    end_jd: f64,
    duration_years: f64,
    depth: i32,
    start_lord_index: usize,
) -> Vec<DashaNode> {
    if depth <= 0 {
        return Vec::new();
    }
    let mut nodes = proportional_children(start_jd, end_jd, duration_years, start_lord_index);
    if depth > 1 {
        for node in &mut nodes {
            node.children = partition(
                node.start_jd,
                node.end_jd,
                days_to_years(node.duration_days()),
                depth - 1,
                node.lord.index(),
            );
        }
    }
    nodes
}

impl DashaNode {
    /// Sub-periods of this node down to `depth` levels, built on demand.
    pub fn expand(&self, depth: i32) -> Result<Vec<DashaNode>, DashaError> {
        compute_subtree(self.start_jd, self.end_jd, depth, self.lord)
    }

    /// This node with its children filled to `depth` levels.
    pub fn expanded(mut self, depth: i32) -> Result<Self, DashaError> {
        self.children = self.expand(depth)?;
        Ok(self)
    }
}
