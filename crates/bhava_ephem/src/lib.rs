//! Ephemeris provider seam for house computation.
//!
//! The house engine never talks to an ephemeris directly. It asks an
//! [`EphemerisProvider`] for the ayanamsa, obliquity, sidereal time, the
//! tropical chart angles and the Placidus borders, always through the
//! lock-serialized [`Ephemeris`] handle. [`NativeProvider`] is the analytic
//! implementation shipped with the workspace.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod ephemeris;
pub mod global;
pub mod native;
pub mod sidereal_mode;

pub use ephemeris::Ephemeris;
pub use native::NativeProvider;
pub use sidereal_mode::SiderealMode;

/// JD of 3001-Jan-01 12:00 UT, the upper end of the default range.
pub const DEFAULT_MAX_JD_UT: f64 = 2_817_153.0;

/// JD of −2999-Jan-01 12:00 UT (3000 BCE), the lower end of the default range.
pub const DEFAULT_MIN_JD_UT: f64 = 625_698.0;

/// Provider configuration used at startup time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderConfig {
    /// Sidereal mode selected before any request sets one.
    pub default_mode: SiderealMode,
    /// Earliest supported UT Julian Day.
    pub min_jd_ut: f64,
    /// Latest supported UT Julian Day.
    pub max_jd_ut: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_mode: SiderealMode::Lahiri,
            min_jd_ut: DEFAULT_MIN_JD_UT,
            max_jd_ut: DEFAULT_MAX_JD_UT,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !self.min_jd_ut.is_finite() || !self.max_jd_ut.is_finite() {
            return Err(EphemerisError::InvalidConfig(
                "supported JD range must be finite",
            ));
        }
        if self.min_jd_ut >= self.max_jd_ut {
            return Err(EphemerisError::InvalidConfig(
                "min_jd_ut must be less than max_jd_ut",
            ));
        }
        Ok(())
    }

    /// Whether `jd_ut` lies inside the supported range.
    pub fn covers(&self, jd_ut: f64) -> bool {
        (self.min_jd_ut..=self.max_jd_ut).contains(&jd_ut)
    }
}

/// Provider errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    InvalidConfig(&'static str),
    /// The process-wide provider has not been initialised.
    NotInitialized,
    EpochOutOfRange { jd_ut: f64 },
    InvalidInput(&'static str),
    /// The backend has no data for the request.
    DataUnavailable(String),
    /// A previous provider call panicked while holding the lock.
    LockPoisoned,
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid provider config: {msg}"),
            Self::NotInitialized => write!(f, "ephemeris provider not initialized"),
            Self::EpochOutOfRange { jd_ut } => write!(f, "epoch out of range: JD {jd_ut}"),
            Self::InvalidInput(msg) => write!(f, "invalid provider input: {msg}"),
            Self::DataUnavailable(msg) => write!(f, "ephemeris data unavailable: {msg}"),
            Self::LockPoisoned => write!(f, "ephemeris lock poisoned"),
        }
    }
}

impl Error for EphemerisError {}

/// Tropical chart angles at a moment and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSet {
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
    /// Right ascension of the meridian.
    pub armc_deg: f64,
}

/// Tropical Placidus house borders with the angles they were built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacidusBorders {
    /// Index 0 is the Ascendant, index 9 the Midheaven.
    pub borders_deg: [f64; 12],
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
}

/// Result of a Placidus request.
///
/// `Undefined` is a normal outcome at circumpolar latitudes, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacidusOutcome {
    Computed(PlacidusBorders),
    Undefined { latitude_deg: f64, reason: String },
}

/// Backend capable of answering the house engine's astronomical queries.
///
/// All longitudes are tropical degrees in `[0, 360)`. Implementations keep
/// mutable state (the current sidereal mode) and need not be `Sync`; callers
/// go through [`Ephemeris`], which serializes access.
pub trait EphemerisProvider: Send {
    fn name(&self) -> &'static str;

    fn set_sidereal_mode(&mut self, mode: SiderealMode);

    fn sidereal_mode(&self) -> SiderealMode;

    /// Ayanamsa of the current sidereal mode, in degrees.
    fn ayanamsa_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// True obliquity of the ecliptic, in degrees.
    fn obliquity_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Greenwich apparent sidereal time, in hours `[0, 24)`.
    fn sidereal_time_hours(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Ascendant, Midheaven and ARMC by a method defined at every latitude.
    fn angles(
        &mut self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<AngleSet, EphemerisError>;

    /// Placidus house borders.
    fn placidus(
        &mut self,
        jd_ut: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<PlacidusOutcome, EphemerisError>;
}
