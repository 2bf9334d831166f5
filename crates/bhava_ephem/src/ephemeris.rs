//! Lock-serialized access to an [`EphemerisProvider`].

use std::fmt::{Debug, Formatter};
use std::sync::{Mutex, MutexGuard};

use crate::{
    AngleSet, EphemerisError, EphemerisProvider, NativeProvider, PlacidusOutcome,
    ProviderConfig, SiderealMode,
};

/// Shared provider handle.
///
/// `Ephemeris` is [`Send`] + [`Sync`]. The lock is held for one provider call
/// at a time, never across a whole house request, so the local geometry of
/// concurrent requests runs in parallel.
pub struct Ephemeris {
    provider: Mutex<Box<dyn EphemerisProvider>>,
}

impl Debug for Ephemeris {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = self.provider.lock().map(|p| p.name()).unwrap_or("<poisoned>");
        f.debug_struct("Ephemeris").field("provider", &name).finish()
    }
}

impl Ephemeris {
    /// Wrap an arbitrary provider.
    pub fn new(provider: Box<dyn EphemerisProvider>) -> Self {
        Self {
            provider: Mutex::new(provider),
        }
    }

    /// Build around a [`NativeProvider`].
    pub fn native(config: ProviderConfig) -> Result<Self, EphemerisError> {
        Ok(Self::new(Box::new(NativeProvider::new(config)?)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn EphemerisProvider>>, EphemerisError> {
        self.provider.lock().map_err(|_| EphemerisError::LockPoisoned)
    }

    pub fn provider_name(&self) -> Result<&'static str, EphemerisError> {
        Ok(self.lock()?.name())
    }

    /// Select `mode` and read its ayanamsa under one lock acquisition.
    pub fn ayanamsa_deg(&self, mode: SiderealMode, jd_ut: f64) -> Result<f64, EphemerisError> {
        let mut provider = self.lock()?;
        provider.set_sidereal_mode(mode);
        provider.ayanamsa_deg(jd_ut)
    }

    pub fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.lock()?.obliquity_deg(jd_ut)
    }

    pub fn sidereal_time_hours(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.lock()?.sidereal_time_hours(jd_ut)
    }

    pub fn angles(
        &self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<AngleSet, EphemerisError> {
        self.lock()?.angles(jd_ut, latitude_deg, longitude_deg)
    }

    pub fn placidus(
        &self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<PlacidusOutcome, EphemerisError> {
        self.lock()?.placidus(jd_ut, latitude_deg, longitude_deg)
    }
}
