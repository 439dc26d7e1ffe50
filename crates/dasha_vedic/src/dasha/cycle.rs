//! Birth pipeline: Moon longitude in, Mahadashas out.

use dasha_time::UtcOffset;

use crate::error::DashaError;

use super::balance::{BirthContext, resolve_birth_lord};
use super::query::{DashaSnapshot, active_chain};
use super::types::{DEFAULT_DASHA_DEPTH, DashaNode, MAX_DASHA_DEPTH};
use super::vimshottari::birth_mahadashas;

/// Per-request settings. There is no global state; every caller passes one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaConfig {
    /// Levels to pre-expand below the cycle (1 = Mahadashas only).
    pub max_depth: i32,
    /// Offset used when presenting period boundaries as civil time.
    pub utc_offset: UtcOffset,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DASHA_DEPTH,
            utc_offset: UtcOffset::UTC,
        }
    }
}

impl DashaConfig {
    pub fn with_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth.min(MAX_DASHA_DEPTH);
        self
    }

    pub fn with_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }
}

/// A resolved birth context together with its Mahadasha sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaCycle {
    pub birth: BirthContext,
    pub mahadashas: Vec<DashaNode>,
}

impl DashaCycle {
    /// Active period at each level at `query_jd`, down to `depth` levels.
    pub fn active_at(&self, query_jd: f64, depth: i32) -> Result<DashaSnapshot, DashaError> {
        active_chain(&self.mahadashas, query_jd, depth)
    }
}

/// Resolve the birth lord from `moon_sidereal_lon` at `birth_jd` and build
/// the Mahadashas, pre-expanded to `depth` levels.
pub fn dasha_cycle(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    depth: i32,
) -> Result<DashaCycle, DashaError> {
    let birth = resolve_birth_lord(moon_sidereal_lon, birth_jd)?;
    let mahadashas = birth_mahadashas(&birth, depth)?;
    Ok(DashaCycle { birth, mahadashas })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lord::Lord;

    const J2000: f64 = 2_451_545.0;

    #[test]
    fn default_config_is_top_level_utc() {
        let cfg = DashaConfig::default();
        assert_eq!(cfg.max_depth, 1);
        assert_eq!(cfg.utc_offset, UtcOffset::UTC);
        assert_eq!(cfg.with_depth(40).max_depth, MAX_DASHA_DEPTH);
    }

    #[test]
    fn cycle_starts_before_birth() {
        let cycle = dasha_cycle(200.0, J2000, 1).unwrap();
        assert_eq!(cycle.mahadashas.len(), 9);
        assert!(cycle.mahadashas[0].start_jd <= J2000);
        assert_eq!(cycle.mahadashas[0].lord, cycle.birth.start_lord);

        let now = cycle.active_at(J2000, 2).unwrap();
        assert_eq!(now.periods[0].lord, cycle.birth.start_lord);
    }

    #[test]
    fn moon_in_ashwini_starts_with_ketu() {
        let cycle = dasha_cycle(5.0, J2000, 2).unwrap();
        assert_eq!(cycle.birth.start_lord, Lord::Ketu);
        assert_eq!(cycle.mahadashas[0].children.len(), 9);
    }

    #[test]
    fn bad_longitude_propagates() {
        assert_eq!(
            dasha_cycle(f64::NAN, J2000, 1),
            Err(DashaError::NonFiniteLongitude)
        );
    }
}
