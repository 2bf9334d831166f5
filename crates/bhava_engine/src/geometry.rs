//! Per-request geometric quantities read from the provider.

use bhava_ephem::{Ephemeris, SiderealMode};
use bhava_time::local_sidereal_time_hours;
use serde::Serialize;
use tracing::debug;

use crate::error::BhavaError;
use crate::util::normalize_360;

/// Ayanamsa, obliquity and sidereal time for one moment and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub ayanamsa_deg: f64,
    /// True obliquity of the ecliptic.
    pub epsilon_deg: f64,
    /// Greenwich apparent sidereal time.
    pub gst_hours: f64,
    pub lst_hours: f64,
    /// Right ascension of the meridian.
    pub ramc_deg: f64,
}

impl Geometry {
    /// Query the provider. Each value is one locked provider call.
    ///
    /// `lst = (gst + longitude/15) mod 24` and `ramc = lst·15 mod 360`.
    pub fn compute(
        eph: &Ephemeris,
        mode: SiderealMode,
        jd_ut: f64,
        longitude_deg: f64,
    ) -> Result<Self, BhavaError> {
        let ayanamsa_deg = eph.ayanamsa_deg(mode, jd_ut)?;
        let epsilon_deg = eph.obliquity_deg(jd_ut)?;
        let gst_hours = eph.sidereal_time_hours(jd_ut)?;
        let geometry = Self::from_parts(ayanamsa_deg, epsilon_deg, gst_hours, longitude_deg);
        debug!(
            jd_ut,
            mode = mode.name(),
            ayanamsa_deg,
            epsilon_deg,
            gst_hours,
            ramc_deg = geometry.ramc_deg,
            "geometry resolved"
        );
        Ok(geometry)
    }

    /// Assemble from already-known provider values.
    pub fn from_parts(ayanamsa_deg: f64, epsilon_deg: f64, gst_hours: f64, longitude_deg: f64) -> Self {
        let lst_hours = local_sidereal_time_hours(gst_hours, longitude_deg);
        Self {
            ayanamsa_deg,
            epsilon_deg,
            gst_hours,
            lst_hours,
            ramc_deg: normalize_360(lst_hours * 15.0),
        }
    }
}
