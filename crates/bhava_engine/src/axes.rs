//! Chart angles in the sidereal and tropical zodiacs.

use bhava_ephem::Ephemeris;
use serde::Serialize;

use crate::error::BhavaError;
use crate::util::{normalize_360, opposite, to_sidereal};

/// Ascendant/Midheaven and their opposites, each in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axes {
    pub asc_deg_sid: f64,
    pub mc_deg_sid: f64,
    pub desc_deg_sid: f64,
    pub ic_deg_sid: f64,
    pub asc_deg_trop: f64,
    pub mc_deg_trop: f64,
}

impl Axes {
    /// Build from tropical Ascendant and Midheaven.
    pub fn from_tropical(asc_trop_deg: f64, mc_trop_deg: f64, ayanamsa_deg: f64) -> Self {
        let asc_deg_sid = to_sidereal(asc_trop_deg, ayanamsa_deg);
        let mc_deg_sid = to_sidereal(mc_trop_deg, ayanamsa_deg);
        Self {
            asc_deg_sid,
            mc_deg_sid,
            desc_deg_sid: opposite(asc_deg_sid),
            ic_deg_sid: opposite(mc_deg_sid),
            asc_deg_trop: normalize_360(asc_trop_deg),
            mc_deg_trop: normalize_360(mc_trop_deg),
        }
    }
}

/// Ask the provider for the latitude-independent angle pair and convert.
pub fn compute_axes(
    eph: &Ephemeris,
    jd_ut: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    ayanamsa_deg: f64,
) -> Result<Axes, BhavaError> {
    let angles = eph.angles(jd_ut, latitude_deg, longitude_deg)?;
    Ok(Axes::from_tropical(
        angles.ascendant_deg,
        angles.midheaven_deg,
        ayanamsa_deg,
    ))
}
