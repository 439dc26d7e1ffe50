//! Serializable records handed to renderers.
//!
//! A record mirrors a [`DashaNode`] with its boundaries also given as civil
//! timestamps under a fixed UTC offset. JSON shape:
//!
//! ```text
//! { "lord": "Venus", "start": "2000-01-01 12:00:00", "end": "...",
//!   "start_instant": 2451545.0, "end_instant": 2458850.97, "children": [...] }
//! ```
//!
//! `children` is omitted when a node was not expanded.

use dasha_time::{CivilTime, UtcOffset, jd_to_local};
use serde::{Deserialize, Serialize};

use crate::error::DashaError;
use crate::lord::Lord;

use super::cycle::{DashaConfig, dasha_cycle};
use super::types::{DEFAULT_DASHA_DEPTH, DashaNode};
use super::vimshottari::compute_subtree;

/// One period with civil and Julian Day boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaRecord {
    pub lord: Lord,
    pub start: CivilTime,
    pub end: CivilTime,
    #[serde(rename = "start_instant", alias = "start_jd")]
    pub start_jd: f64,
    #[serde(rename = "end_instant", alias = "end_jd")]
    pub end_jd: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaRecord>,
}

impl DashaRecord {
    /// Convert `node` and its materialized descendants.
    pub fn from_node(node: &DashaNode, offset: UtcOffset) -> Result<Self, DashaError> {
        Ok(Self {
            lord: node.lord,
            start: jd_to_local(node.start_jd, offset)?,
            end: jd_to_local(node.end_jd, offset)?,
            start_jd: node.start_jd,
            end_jd: node.end_jd,
            children: dasha_records(&node.children, offset)?,
        })
    }
}

/// Convert a sibling list to records.
pub fn dasha_records(
    nodes: &[DashaNode],
    offset: UtcOffset,
) -> Result<Vec<DashaRecord>, DashaError> {
    nodes
        .iter()
        .map(|n| DashaRecord::from_node(n, offset))
        .collect()
}

/// Birth context plus the Mahadasha records of the running cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VimshottariReport {
    /// Moon sidereal longitude, degrees, rounded to 6 decimals.
    pub moon_sid_deg: f64,
    pub nakshatra_index: u8,
    pub nakshatra_name: String,
    /// Fraction of the nakshatra traversed, rounded to 6 decimals.
    pub nakshatra_fraction: f64,
    pub start_lord: Lord,
    pub mahadashas: Vec<DashaRecord>,
}

/// Build the full report for a birth at `birth_jd` with the Moon at
/// `moon_sidereal_lon`, expanded and presented per `config`.
pub fn vimshottari_report(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    config: &DashaConfig,
) -> Result<VimshottariReport, DashaError> {
    let cycle = dasha_cycle(moon_sidereal_lon, birth_jd, config.max_depth)?;
    let birth = &cycle.birth;
    Ok(VimshottariReport {
        moon_sid_deg: round6(birth.moon_longitude_deg),
        nakshatra_index: birth.nakshatra_index,
        nakshatra_name: birth.nakshatra_name().to_string(),
        nakshatra_fraction: round6(birth.fraction_elapsed),
        start_lord: birth.start_lord,
        mahadashas: dasha_records(&cycle.mahadashas, config.utc_offset)?,
    })
}

/// Lazy expansion request for one already-rendered node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtreeRequest {
    #[serde(alias = "start_instant")]
    pub start_jd: f64,
    #[serde(alias = "end_instant")]
    pub end_jd: f64,
    #[serde(default, alias = "tz")]
    pub tz_hours: f64,
    #[serde(default = "default_depth", alias = "level")]
    pub depth: i32,
    /// English or Sanskrit lord name, case-insensitive.
    pub lord: String,
}

fn default_depth() -> i32 {
    DEFAULT_DASHA_DEPTH
}

impl SubtreeRequest {
    pub fn new(start_jd: f64, end_jd: f64, lord: Lord) -> Self {
        Self {
            start_jd,
            end_jd,
            tz_hours: 0.0,
            depth: DEFAULT_DASHA_DEPTH,
            lord: lord.name().to_string(),
        }
    }

    /// Children of the requested node only; its ancestors are never rebuilt.
    pub fn resolve(&self) -> Result<Vec<DashaRecord>, DashaError> {
        let lord: Lord = self.lord.parse()?;
        let offset = UtcOffset::from_hours(self.tz_hours)?;
        let nodes = compute_subtree(self.start_jd, self.end_jd, self.depth, lord)?;
        dasha_records(&nodes, offset)
    }
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}
