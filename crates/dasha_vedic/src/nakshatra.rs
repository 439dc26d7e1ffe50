//! The 27 equal nakshatra segments of the sidereal ecliptic.

use crate::util::normalize_360;

/// Number of nakshatras in the 27-fold scheme.
pub const NAKSHATRA_COUNT: usize = 27;

/// Span of one nakshatra in degrees (13°20').
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Nakshatra names, 0 = Ashwini .. 26 = Revati.
pub const NAKSHATRA_NAMES: [&str; NAKSHATRA_COUNT] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// Position of a sidereal longitude within the nakshatra wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraPosition {
    /// 0-based index (0 = Ashwini .. 26 = Revati).
    pub index: u8,
    /// Fraction of the nakshatra already traversed, in [0, 1).
    pub fraction: f64,
}

impl NakshatraPosition {
    pub fn name(&self) -> &'static str {
        nakshatra_name(self.index)
    }
}

/// Locate a sidereal longitude (any real, normalized first) in the 27 segments.
pub fn nakshatra_position(sidereal_lon: f64) -> NakshatraPosition {
    // (lon mod span) / span, taken from the same quotient as the index so the
    // two never disagree at a segment boundary (40° is Rohini + 0, not
    // Krittika + 0.9999999).
    let q = normalize_360(sidereal_lon) / NAKSHATRA_SPAN_27;
    let index = (q.floor() as u8).min(26);
    let fraction = q.fract();
    NakshatraPosition { index, fraction }
}

/// Name of a nakshatra by 0-based index. Out-of-range indices clamp to Revati.
pub fn nakshatra_name(index: u8) -> &'static str {
    NAKSHATRA_NAMES[(index as usize).min(NAKSHATRA_COUNT - 1)]
}
