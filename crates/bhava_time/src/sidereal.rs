//! Earth Rotation Angle, Greenwich Mean Sidereal Time and local sidereal time.
//!
//! All functions take UT Julian Days. The engine does not distinguish UT1
//! from UT: the |UT1 − UTC| < 0.9 s difference moves the sidereal time by
//! less than 4 milli-degrees, well below house-cusp precision.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15. Public domain.
//! - GMST polynomial: Capitaine et al. 2003, Table 2. Public domain.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

/// Arcseconds to radians: 1″ = π / (180 × 3600).
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Hours in one full turn.
pub const HOURS_PER_TURN: f64 = 24.0;

/// `x` reduced to [0, period). `rem_euclid` can return `period` itself for
/// tiny negative inputs; that case folds to 0.
fn wrap(x: f64, period: f64) -> f64 {
    let r = x.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

/// Earth Rotation Angle at a given UT Julian Day.
///
/// θ = 2π × (0.7790572732640 + 1.00273781191135448 × Du)
/// where Du = JD_UT − 2451545.0.
///
/// Returns radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    wrap(theta, TAU)
}

/// Greenwich Mean Sidereal Time at a given UT Julian Day.
///
/// GMST = ERA + polynomial(T), where T = Julian centuries of UT from J2000.0.
///
/// Polynomial (arcseconds):
///   0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
///   − 0.000029956·T⁴ − 0.0000000368·T⁵
///
/// Returns radians in [0, 2π).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut);
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    wrap(era + poly_arcsec * ARCSEC_TO_RAD, TAU)
}

/// Convert a sidereal angle in radians to hours in [0, 24).
pub fn rad_to_hours(angle_rad: f64) -> f64 {
    wrap(wrap(angle_rad, TAU) / TAU * HOURS_PER_TURN, HOURS_PER_TURN)
}

/// Local sidereal time in hours from Greenwich sidereal time in hours.
///
/// LST = (GST + longitude_east / 15) mod 24.
pub fn local_sidereal_time_hours(greenwich_hours: f64, longitude_east_deg: f64) -> f64 {
    wrap(greenwich_hours + longitude_east_deg / 15.0, HOURS_PER_TURN)
}
