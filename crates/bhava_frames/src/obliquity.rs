//! Obliquity of the ecliptic.
//!
//! Source: IAU 2006 (P03) mean obliquity, Capitaine, Wallace & Chapront 2003,
//! Eq. 39. Public domain (IAU standard).

use crate::nutation::Nutation;

/// Mean obliquity at J2000.0 in arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.406;

/// Mean obliquity at J2000.0 in degrees (≈ 23.4393°).
pub const OBLIQUITY_J2000_DEG: f64 = OBLIQUITY_J2000_ARCSEC / 3600.0;

/// IAU 2006 mean obliquity of the ecliptic, in arcseconds.
///
/// `t` is Julian centuries since J2000.0.
pub fn mean_obliquity_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    OBLIQUITY_J2000_ARCSEC - 46.836769 * t - 0.0001831 * t2 + 0.00200340 * t3
        - 0.000000576 * t4
        - 0.0000000434 * t5
}

/// IAU 2006 mean obliquity of the ecliptic, in degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_arcsec(t) / 3600.0
}

/// True obliquity (mean + Δε), in degrees.
pub fn true_obliquity_deg(t: f64, nutation: &Nutation) -> f64 {
    (mean_obliquity_arcsec(t) + nutation.deps_arcsec) / 3600.0
}
