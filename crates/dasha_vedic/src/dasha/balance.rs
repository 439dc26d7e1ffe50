//! Birth balance: where the Moon sits in its nakshatra decides the starting
//! Mahadasha lord and how much of that lord's period has already run.

use tracing::debug;

use crate::error::DashaError;
use crate::lord::{LORD_COUNT, Lord, lord_at, weight_of};
use crate::nakshatra::{nakshatra_name, nakshatra_position};
use crate::util::normalize_360;

use super::types::years_to_days;

/// Starting conditions of a Vimshottari cycle, derived once per birth chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthContext {
    /// Moon sidereal longitude normalized to [0, 360).
    pub moon_longitude_deg: f64,
    /// 0-based nakshatra index (0 = Ashwini .. 26 = Revati).
    pub nakshatra_index: u8,
    /// Fraction of the nakshatra already traversed, in [0, 1).
    pub fraction_elapsed: f64,
    /// Lord of the Mahadasha running at the reference instant.
    pub start_lord: Lord,
    /// Years of the starting Mahadasha elapsed at the reference instant.
    pub elapsed_years: f64,
    /// The instant the Mahadasha was sampled at (usually birth), JD UT.
    pub reference_jd: f64,
    /// Start of the running Mahadasha, JD UT (at or before `reference_jd`).
    pub start_jd: f64,
}

impl BirthContext {
    pub fn nakshatra_name(&self) -> &'static str {
        nakshatra_name(self.nakshatra_index)
    }

    /// Years of the starting Mahadasha still to run after the reference instant.
    pub fn balance_years(&self) -> f64 {
        weight_of(self.start_lord) as f64 - self.elapsed_years
    }
}

/// Lord owning a nakshatra: nakshatras and lords share the 9-fold cycle, so
/// Ashwini, Magha and Mula all belong to Ketu.
pub fn nakshatra_lord(nakshatra_index: u8) -> Lord {
    lord_at(0, nakshatra_index as usize % LORD_COUNT)
}

/// Resolve the running Mahadasha from the Moon's sidereal longitude at
/// `reference_jd`.
///
/// The longitude may be any finite real; it is normalized into [0, 360).
pub fn resolve_birth_lord(
    moon_sidereal_lon: f64,
    reference_jd: f64,
) -> Result<BirthContext, DashaError> {
    if !moon_sidereal_lon.is_finite() {
        return Err(DashaError::NonFiniteLongitude);
    }
    if !reference_jd.is_finite() {
        return Err(DashaError::NonFiniteInstant("reference_jd"));
    }

    let lon = normalize_360(moon_sidereal_lon);
    let pos = nakshatra_position(lon);
    let start_lord = nakshatra_lord(pos.index);
    let elapsed_years = pos.fraction * weight_of(start_lord) as f64;
    let start_jd = reference_jd - years_to_days(elapsed_years);

    debug!(
        moon_lon = lon,
        nakshatra = pos.index,
        fraction = pos.fraction,
        lord = start_lord.name(),
        elapsed_years,
        "resolved birth mahadasha"
    );

    Ok(BirthContext {
        moon_longitude_deg: lon,
        nakshatra_index: pos.index,
        fraction_elapsed: pos.fraction,
        start_lord,
        elapsed_years,
        reference_jd,
        start_jd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::types::DAYS_PER_YEAR;
    use crate::nakshatra::NAKSHATRA_SPAN_27;

    const J2000: f64 = 2_451_545.0;

    #[test]
    fn moon_at_zero_is_ketu_with_nothing_elapsed() {
        let ctx = resolve_birth_lord(0.0, J2000).unwrap();
        assert_eq!(ctx.nakshatra_index, 0);
        assert_eq!(ctx.fraction_elapsed, 0.0);
        assert_eq!(ctx.start_lord, Lord::Ketu);
        assert_eq!(ctx.elapsed_years, 0.0);
        assert_eq!(ctx.start_jd, J2000);
        assert!((ctx.balance_years() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn one_segment_is_venus() {
        let ctx = resolve_birth_lord(NAKSHATRA_SPAN_27, J2000).unwrap();
        assert_eq!(ctx.nakshatra_index, 1);
        assert!(ctx.fraction_elapsed.abs() < 1e-12);
        assert_eq!(ctx.start_lord, Lord::Venus);
        assert_eq!(ctx.nakshatra_name(), "Bharani");
    }

    #[test]
    fn mid_rohini_half_of_moon_period_elapsed() {
        let lon = 3.5 * NAKSHATRA_SPAN_27;
        let ctx = resolve_birth_lord(lon, J2000).unwrap();
        assert_eq!(ctx.start_lord, Lord::Moon);
        assert!((ctx.elapsed_years - 5.0).abs() < 1e-9);
        assert!((ctx.start_jd - (J2000 - 5.0 * DAYS_PER_YEAR)).abs() < 1e-6);
    }

    #[test]
    fn start_never_after_reference() {
        for i in 0..720 {
            let ctx = resolve_birth_lord(i as f64 * 0.5, J2000).unwrap();
            assert!(ctx.start_jd <= ctx.reference_jd);
            assert!(ctx.elapsed_years < weight_of(ctx.start_lord) as f64);
        }
    }

    #[test]
    fn nakshatra_index_mod_nine_is_lord_index() {
        for nak in 0u8..27 {
            assert_eq!(nakshatra_lord(nak).index(), nak as usize % 9);
        }
        assert_eq!(nakshatra_lord(9), Lord::Ketu);
        assert_eq!(nakshatra_lord(18), Lord::Ketu);
        assert_eq!(nakshatra_lord(26), Lord::Mercury);
    }

    #[test]
    fn negative_longitude_wraps() {
        let ctx = resolve_birth_lord(-1.0, J2000).unwrap();
        assert!((ctx.moon_longitude_deg - 359.0).abs() < 1e-12);
        assert_eq!(ctx.nakshatra_index, 26);
        assert_eq!(ctx.start_lord, Lord::Mercury);
    }

    #[test]
    fn non_finite_inputs_rejected() {
        assert_eq!(
            resolve_birth_lord(f64::NAN, J2000),
            Err(DashaError::NonFiniteLongitude)
        );
        assert_eq!(
            resolve_birth_lord(f64::NEG_INFINITY, J2000),
            Err(DashaError::NonFiniteLongitude)
        );
        assert_eq!(
            resolve_birth_lord(10.0, f64::NAN),
            Err(DashaError::NonFiniteInstant("reference_jd"))
        );
    }
}
