//! Analytic ephemeris provider.
//!
//! Needs no data files: ayanamsa, obliquity and sidereal time come from the
//! IAU precession/nutation series in `bhava_frames` and the IERS sidereal
//! time in `bhava_time`. UT is used for every argument (ΔT neglected), which
//! moves the results by far less than house-cusp precision.
//!
//! Chart angle sources:
//! - Ascendant/Midheaven: standard spherical astronomy, e.g. Meeus,
//!   "Astronomical Algorithms" (2nd ed), Ch. 13 and 24.
//! - Placidus: semi-arc trisection solved by fixed-point iteration.

use std::f64::consts::{FRAC_PI_3, PI};

use bhava_frames::{Nutation, equation_of_equinoxes_arcsec, true_obliquity_deg};
use bhava_time::{gmst_rad, julian_centuries, local_sidereal_time_hours, rad_to_hours};
use tracing::debug;

use crate::{
    AngleSet, EphemerisError, EphemerisProvider, PlacidusBorders, PlacidusOutcome,
    ProviderConfig, SiderealMode,
};

/// Maximum fixed-point iterations per Placidus cusp.
const PLACIDUS_MAX_ITER: usize = 100;

/// Placidus convergence tolerance in radians.
const PLACIDUS_TOL_RAD: f64 = 1e-11;

/// Analytic provider backed by the IAU 2006/2000B models.
#[derive(Debug, Clone)]
pub struct NativeProvider {
    config: ProviderConfig,
    mode: SiderealMode,
}

impl NativeProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, EphemerisError> {
        config.validate()?;
        Ok(Self {
            mode: config.default_mode,
            config,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn check_epoch(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        if !jd_ut.is_finite() {
            return Err(EphemerisError::InvalidInput("jd_ut must be finite"));
        }
        if !self.config.covers(jd_ut) {
            return Err(EphemerisError::EpochOutOfRange { jd_ut });
        }
        Ok(julian_centuries(jd_ut))
    }

    /// (true obliquity in degrees, nutation) at `t` centuries.
    fn obliquity_and_nutation(t: f64) -> (f64, Nutation) {
        let nutation = Nutation::iau2000b(t);
        let eps = true_obliquity_deg(t, &nutation);
        (eps, nutation)
    }

    /// ARMC in degrees and true obliquity in degrees.
    fn armc_and_obliquity(
        &self,
        jd_ut: f64,
        longitude_deg: f64,
    ) -> Result<(f64, f64), EphemerisError> {
        let t = self.check_epoch(jd_ut)?;
        if !longitude_deg.is_finite() {
            return Err(EphemerisError::InvalidInput("longitude must be finite"));
        }
        let (eps_deg, nutation) = Self::obliquity_and_nutation(t);
        let gast_hours = apparent_sidereal_hours(jd_ut, eps_deg, &nutation);
        let lst_hours = local_sidereal_time_hours(gast_hours, longitude_deg);
        Ok((wrap_deg(lst_hours * 15.0), eps_deg))
    }
}

fn apparent_sidereal_hours(jd_ut: f64, eps_deg: f64, nutation: &Nutation) -> f64 {
    let ee_arcsec = equation_of_equinoxes_arcsec(nutation, eps_deg.to_radians());
    let h = (rad_to_hours(gmst_rad(jd_ut)) + ee_arcsec / 54_000.0).rem_euclid(24.0);
    if h >= 24.0 { 0.0 } else { h }
}

/// Longitude reduced to [0, 360); a `rem_euclid` result of exactly 360 folds to 0.
fn wrap_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

fn check_latitude(latitude_deg: f64) -> Result<(), EphemerisError> {
    if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
        return Err(EphemerisError::InvalidInput(
            "latitude must be finite and in [-90, 90]",
        ));
    }
    Ok(())
}

/// Signed difference `a − b` reduced to `(−180, 180]`.
fn signed_diff_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Ecliptic longitude (radians) of the point with right ascension `ra`.
fn ecliptic_longitude_of_ra(ra: f64, eps: f64) -> f64 {
    ra.sin().atan2(ra.cos() * eps.cos())
}

/// Midheaven: the ecliptic longitude on the meridian.
pub fn midheaven_deg(armc_deg: f64, eps_deg: f64) -> f64 {
    let lambda = ecliptic_longitude_of_ra(armc_deg.to_radians(), eps_deg.to_radians());
    wrap_deg(lambda.to_degrees())
}

/// Ascendant: the ecliptic longitude rising on the eastern horizon.
///
/// Inside the polar circles the raw formula can return the setting point;
/// the result is then flipped so that it lies 0–180° ahead of the Midheaven.
pub fn ascendant_deg(armc_deg: f64, eps_deg: f64, latitude_deg: f64) -> f64 {
    let armc = armc_deg.to_radians();
    let eps = eps_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let y = armc.cos();
    let x = -(armc.sin() * eps.cos() + phi.tan() * eps.sin());
    let asc = wrap_deg(y.atan2(x).to_degrees());
    if signed_diff_deg(asc, midheaven_deg(armc_deg, eps_deg)) < 0.0 {
        wrap_deg(asc + 180.0)
    } else {
        asc
    }
}

/// Solve one Placidus cusp by fixed-point iteration on right ascension.
///
/// Above the horizon (`nocturnal == false`) the cusp satisfies
/// `RA = ARMC + k·DSA/3`; below it, `RA = ARMC + 180° − k·NSA/3`.
fn placidus_cusp(
    armc: f64,
    eps: f64,
    tan_phi: f64,
    k: f64,
    nocturnal: bool,
) -> Result<f64, &'static str> {
    let mut ra = if nocturnal {
        armc + PI - k * FRAC_PI_3 / 2.0
    } else {
        armc + k * FRAC_PI_3 / 2.0
    };

    for _ in 0..PLACIDUS_MAX_ITER {
        let lambda = ecliptic_longitude_of_ra(ra, eps);
        let decl = (eps.sin() * lambda.sin()).asin();
        let x = -tan_phi * decl.tan();
        if x.abs() > 1.0 {
            return Err("cusp point is circumpolar");
        }
        let dsa = x.acos();
        let next = if nocturnal {
            armc + PI - k * (PI - dsa) / 3.0
        } else {
            armc + k * dsa / 3.0
        };
        if (next - ra).abs() < PLACIDUS_TOL_RAD {
            return Ok(wrap_deg(ecliptic_longitude_of_ra(next, eps).to_degrees()));
        }
        ra = next;
    }
    Err("iteration did not converge")
}

/// Twelve tropical Placidus borders, index 0 = house 1.
///
/// Fails with a reason when the latitude is inside a polar circle
/// (`|φ| ≥ 90° − ε`) or a cusp cannot be solved.
pub fn placidus_borders(
    armc_deg: f64,
    eps_deg: f64,
    latitude_deg: f64,
) -> Result<[f64; 12], &'static str> {
    if latitude_deg.abs() >= 90.0 - eps_deg {
        return Err("latitude inside the polar circle");
    }
    let armc = armc_deg.to_radians();
    let eps = eps_deg.to_radians();
    let tan_phi = latitude_deg.to_radians().tan();

    let h11 = placidus_cusp(armc, eps, tan_phi, 1.0, false)?;
    let h12 = placidus_cusp(armc, eps, tan_phi, 2.0, false)?;
    let h2 = placidus_cusp(armc, eps, tan_phi, 2.0, true)?;
    let h3 = placidus_cusp(armc, eps, tan_phi, 1.0, true)?;
    let asc = ascendant_deg(armc_deg, eps_deg, latitude_deg);
    let mc = midheaven_deg(armc_deg, eps_deg);

    let opp = |d: f64| wrap_deg(d + 180.0);
    Ok([
        asc,
        h2,
        h3,
        opp(mc),
        opp(h11),
        opp(h12),
        opp(asc),
        opp(h2),
        opp(h3),
        mc,
        h11,
        h12,
    ])
}

impl EphemerisProvider for NativeProvider {
    fn name(&self) -> &'static str {
        "native"
    }

    fn set_sidereal_mode(&mut self, mode: SiderealMode) {
        self.mode = mode;
    }

    fn sidereal_mode(&self) -> SiderealMode {
        self.mode
    }

    fn ayanamsa_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let t = self.check_epoch(jd_ut)?;
        Ok(self.mode.ayanamsa_deg(t, &Nutation::iau2000b(t)))
    }

    fn obliquity_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let t = self.check_epoch(jd_ut)?;
        Ok(Self::obliquity_and_nutation(t).0)
    }

    fn sidereal_time_hours(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let t = self.check_epoch(jd_ut)?;
        let (eps_deg, nutation) = Self::obliquity_and_nutation(t);
        Ok(apparent_sidereal_hours(jd_ut, eps_deg, &nutation))
    }

    fn angles(
        &mut self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<AngleSet, EphemerisError> {
        check_latitude(latitude_deg)?;
        let (armc_deg, eps_deg) = self.armc_and_obliquity(jd_ut, longitude_deg)?;
        Ok(AngleSet {
            ascendant_deg: ascendant_deg(armc_deg, eps_deg, latitude_deg),
            midheaven_deg: midheaven_deg(armc_deg, eps_deg),
            armc_deg,
        })
    }

    fn placidus(
        &mut self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<PlacidusOutcome, EphemerisError> {
        check_latitude(latitude_deg)?;
        let (armc_deg, eps_deg) = self.armc_and_obliquity(jd_ut, longitude_deg)?;
        match placidus_borders(armc_deg, eps_deg, latitude_deg) {
            Ok(borders_deg) => Ok(PlacidusOutcome::Computed(PlacidusBorders {
                borders_deg,
                ascendant_deg: borders_deg[0],
                midheaven_deg: borders_deg[9],
            })),
            Err(reason) => {
                debug!(latitude_deg, armc_deg, eps_deg, reason, "placidus undefined");
                Ok(PlacidusOutcome::Undefined {
                    latitude_deg,
                    reason: reason.to_string(),
                })
            }
        }
    }
}
