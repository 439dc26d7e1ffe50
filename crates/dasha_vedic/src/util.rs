//! Shared angle helpers.

/// Normalize an angle to [0, 360) degrees.
///
/// Negative remainders are shifted up by 360, so `-10.0` maps to `350.0`.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 {
        // -1e-14 % 360 + 360 rounds to exactly 360.0
        let wrapped = r + 360.0;
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    } else {
        r
    }
}
