//! Active-period queries: which lord rules at a given instant, at each level.

use crate::error::DashaError;

use super::types::{DashaLevel, DashaNode};
use super::vimshottari::capped_depth;

/// Active periods at one instant, outermost first (Mahadasha, Bhukti, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct DashaSnapshot {
    /// The queried JD UT.
    pub query_jd: f64,
    /// Childless copies of the active node at each level.
    pub periods: Vec<DashaNode>,
}

impl DashaSnapshot {
    /// Active periods paired with their level names.
    pub fn levels(&self) -> impl Iterator<Item = (DashaLevel, &DashaNode)> {
        self.periods
            .iter()
            .enumerate()
            .filter_map(|(i, p)| DashaLevel::from_depth(i as i32 + 1).map(|l| (l, p)))
    }
}

/// Index of the sibling whose half-open span contains `jd`.
///
/// Siblings are contiguous and sorted, so this is a binary search.
pub fn find_active_period(nodes: &[DashaNode], jd: f64) -> Option<usize> {
    let idx = nodes.partition_point(|n| n.end_jd <= jd);
    nodes.get(idx).filter(|n| n.contains(jd)).map(|_| idx)
}

/// Walk from the Mahadashas down to `depth` levels, expanding only the
/// active node at each level (O(depth · 9) instead of O(9^depth)).
///
/// Already-materialized children are reused. The chain stops early if `jd`
/// falls outside the cycle; it is empty when no Mahadasha contains `jd`.
pub fn active_chain(
    mahadashas: &[DashaNode],
    query_jd: f64,
    depth: i32,
) -> Result<DashaSnapshot, DashaError> {
    if !query_jd.is_finite() {
        return Err(DashaError::NonFiniteInstant("query_jd"));
    }
    let depth = capped_depth(depth);
    let mut periods = Vec::with_capacity(depth.max(0) as usize);

    let mut expanded: Vec<DashaNode>;
    let mut siblings: &[DashaNode] = mahadashas;
    for level in 1..=depth {
        let Some(idx) = find_active_period(siblings, query_jd) else {
            break;
        };
        let active = &siblings[idx];
        periods.push(DashaNode {
            children: Vec::new(),
            ..*active
        });
        if level == depth {
            break;
        }
        if active.children.is_empty() {
            expanded = active.expand(1)?;
            siblings = &expanded;
        } else {
            siblings = &active.children;
        }
    }

    Ok(DashaSnapshot { query_jd, periods })
}
