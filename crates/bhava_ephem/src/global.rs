//! Process-wide provider instance.
//!
//! The provider is initialised at most once per process. Either call
//! [`init`] before serving requests, or let [`get_or_init_default`] set it
//! up on first use. Re-initialisation with different settings is not
//! supported: later calls return the existing instance.

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::{Ephemeris, EphemerisError, ProviderConfig};

static EPHEMERIS: OnceLock<(ProviderConfig, Ephemeris)> = OnceLock::new();

/// Initialise the global provider with a [`NativeProvider`](crate::NativeProvider).
///
/// Validation happens before anything is stored. A second call returns the
/// instance created by the first; a differing config is logged and ignored.
pub fn init(config: ProviderConfig) -> Result<&'static Ephemeris, EphemerisError> {
    config.validate()?;
    if let Some((existing, eph)) = EPHEMERIS.get() {
        if *existing != config {
            warn!(?existing, requested = ?config, "ephemeris already initialized, ignoring new config");
        }
        return Ok(eph);
    }
    let candidate = Ephemeris::native(config)?;
    let mut created = false;
    let (_, eph) = EPHEMERIS.get_or_init(|| {
        created = true;
        (config, candidate)
    });
    if created {
        info!(
            default_mode = config.default_mode.name(),
            min_jd_ut = config.min_jd_ut,
            max_jd_ut = config.max_jd_ut,
            "ephemeris provider initialized"
        );
    }
    Ok(eph)
}

/// The global provider, or `NotInitialized` before [`init`].
pub fn ephemeris() -> Result<&'static Ephemeris, EphemerisError> {
    EPHEMERIS
        .get()
        .map(|(_, eph)| eph)
        .ok_or(EphemerisError::NotInitialized)
}

/// The global provider, initialised with [`ProviderConfig::default`] if needed.
pub fn get_or_init_default() -> Result<&'static Ephemeris, EphemerisError> {
    match ephemeris() {
        Ok(eph) => Ok(eph),
        Err(EphemerisError::NotInitialized) => init(ProviderConfig::default()),
        Err(e) => Err(e),
    }
}

/// Whether the global provider has been initialised.
pub fn is_initialized() -> bool {
    EPHEMERIS.get().is_some()
}
