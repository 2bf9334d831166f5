//! IAU 2006 general precession in ecliptic longitude.
//!
//! p_A is the accumulated westward drift of the vernal equinox along the
//! ecliptic since J2000.0. Ayanamsa values at arbitrary epochs are their
//! J2000.0 reference offset plus this drift.
//!
//! Source: Capitaine, Wallace & Chapront 2003, _Astronomy & Astrophysics_
//! 412, 567-586 (Table 1). Public domain (IAU standard).

/// General precession p_A in arcseconds at `t` Julian centuries since J2000.0.
///
/// Positive for epochs after J2000.0. The linear term is about
/// 5028.80″ per century.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession p_A in degrees at `t` Julian centuries since J2000.0.
pub fn general_precession_deg(t: f64) -> f64 {
    general_precession_arcsec(t) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_j2000() {
        assert_eq!(general_precession_arcsec(0.0), 0.0);
    }

    #[test]
    fn annual_rate() {
        let p = general_precession_arcsec(0.01);
        assert!((p - 50.29).abs() < 0.1, "p_A(1 yr) = {p}");
    }

    #[test]
    fn sign_follows_epoch() {
        assert!(general_precession_arcsec(-1.0) < 0.0);
        assert!(general_precession_arcsec(1.0) > 0.0);
    }
}
