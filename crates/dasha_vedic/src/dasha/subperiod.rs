//! Proportional sub-period partitioning shared by every tree level.
//!
//! A parent span is split among the nine lords in cycle order starting at a
//! given lord; each child gets `weight / 120` of the parent's years.

use crate::lord::{LORD_COUNT, TOTAL_CYCLE_YEARS, lord_at, weight_of};

use super::types::{DashaNode, years_to_days};

/// Snap the last child's end to the parent's end to absorb floating-point drift.
pub fn snap_last_child_end(children: &mut [DashaNode], parent_end_jd: f64) {
    if let Some(last) = children.last_mut() {
        last.end_jd = parent_end_jd;
    }
}

/// Split `[start_jd, end_jd)` (lasting `duration_years`) into nine contiguous
/// childless nodes, rotating from `start_lord_index`.
///
/// `child[i].end_jd == child[i + 1].start_jd` holds exactly, and the last
/// child ends at `end_jd`.
pub fn proportional_children(
    start_jd: f64,
    end_jd: f64,
    duration_years: f64,
    start_lord_index: usize,
) -> Vec<DashaNode> {
    let mut children = Vec::with_capacity(LORD_COUNT);
    let mut cursor = start_jd;

    for offset in 0..LORD_COUNT {
        let lord = lord_at(start_lord_index, offset);
        let sub_years = duration_years * weight_of(lord) as f64 / TOTAL_CYCLE_YEARS as f64;
        let end = cursor + years_to_days(sub_years);
        children.push(DashaNode {
            lord,
            start_jd: cursor,
            end_jd: end,
            children: Vec::new(),
        });
        cursor = end;
    }

    snap_last_child_end(&mut children, end_jd);
    children
}
