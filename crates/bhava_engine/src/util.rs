//! Angle helpers shared by the house algorithms.

use crate::error::BhavaError;

/// Normalize an angle to [0, 360) degrees.
///
/// Tiny negative inputs can round to exactly 360 under `rem_euclid`; those
/// are folded back to 0.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// [`normalize_360`] for caller-supplied values: NaN and ±∞ are rejected.
pub fn checked_normalize_360(deg: f64) -> Result<f64, BhavaError> {
    if !deg.is_finite() {
        return Err(BhavaError::InvalidInput("angle must be finite"));
    }
    Ok(normalize_360(deg))
}

/// Forward arc from `a` to `b` in degrees, in [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    normalize_360(b - a)
}

/// The diametrically opposite longitude.
pub fn opposite(deg: f64) -> f64 {
    normalize_360(deg + 180.0)
}

/// Sidereal longitude from tropical: `tropical − ayanamsa`, normalized.
pub fn to_sidereal(tropical_deg: f64, ayanamsa_deg: f64) -> f64 {
    normalize_360(tropical_deg - ayanamsa_deg)
}
