//! Request-side types for house computation.

use serde::Serialize;

use crate::ayanamsa::PRIMARY_MODE;
use crate::error::BhavaError;

/// The three supported house division algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HouseSystem {
    /// Whole-sign: each house is one zodiac sign, starting at the Ascendant's.
    #[serde(rename = "sign-based")]
    SignBased,
    /// Śrīpati/Porphyry: trisect the quadrant arcs between the angles.
    #[serde(rename = "arc-trisection")]
    ArcTrisection,
    /// Placidus: trisect diurnal/nocturnal semi-arcs in time.
    #[serde(rename = "time-division")]
    TimeDivision,
}

const ALL_HOUSE_SYSTEMS: [HouseSystem; 3] = [
    HouseSystem::SignBased,
    HouseSystem::ArcTrisection,
    HouseSystem::TimeDivision,
];

impl HouseSystem {
    pub const fn all() -> &'static [HouseSystem] {
        &ALL_HOUSE_SYSTEMS
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SignBased => "sign-based",
            Self::ArcTrisection => "arc-trisection",
            Self::TimeDivision => "time-division",
        }
    }

    /// Parse a system name, accepting the traditional names too
    /// (`whole-sign`, `sripati`, `porphyry`, `placidus`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "sign-based" | "whole-sign" | "wholesign" => Some(Self::SignBased),
            "arc-trisection" | "sripati" | "porphyry" => Some(Self::ArcTrisection),
            "time-division" | "placidus" => Some(Self::TimeDivision),
            _ => None,
        }
    }
}

/// Where the computation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Backend {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// Computed locally from the chart angles.
    #[serde(rename = "native-geometric")]
    NativeGeometric,
    /// Delegated to the ephemeris provider.
    #[serde(rename = "provider-delegated")]
    ProviderDelegated,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::NativeGeometric => "native-geometric",
            Self::ProviderDelegated => "provider-delegated",
        }
    }

    /// Parse a backend name; `native` and `provider` are accepted as short forms.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "auto" => Some(Self::Auto),
            "native-geometric" | "native" => Some(Self::NativeGeometric),
            "provider-delegated" | "provider" => Some(Self::ProviderDelegated),
            _ => None,
        }
    }

    /// Concrete backend for `system`; `Auto` picks the provider only for
    /// time-division.
    pub const fn resolve(self, system: HouseSystem) -> Backend {
        match self {
            Self::Auto => match system {
                HouseSystem::TimeDivision => Self::ProviderDelegated,
                HouseSystem::SignBased | HouseSystem::ArcTrisection => Self::NativeGeometric,
            },
            other => other,
        }
    }
}

/// Optional output arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HouseOptions {
    pub return_borders: bool,
    pub return_width: bool,
}

/// A single house computation request.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseRequest {
    /// Julian Day, Universal Time.
    pub jd_ut: f64,
    pub latitude_deg: f64,
    /// East-positive.
    pub longitude_deg: f64,
    pub ayanamsa: String,
    pub house_system: HouseSystem,
    pub backend: Backend,
    pub options: HouseOptions,
}

impl HouseRequest {
    /// Whole-sign request with Lahiri ayanamsa and automatic backend.
    pub fn new(jd_ut: f64, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            jd_ut,
            latitude_deg,
            longitude_deg,
            ayanamsa: PRIMARY_MODE.name().to_string(),
            house_system: HouseSystem::SignBased,
            backend: Backend::Auto,
            options: HouseOptions::default(),
        }
    }

    pub fn with_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }

    pub fn with_ayanamsa(mut self, ayanamsa: impl Into<String>) -> Self {
        self.ayanamsa = ayanamsa.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_borders(mut self) -> Self {
        self.options.return_borders = true;
        self
    }

    pub fn with_widths(mut self) -> Self {
        self.options.return_width = true;
        self
    }

    /// Reject non-finite numbers and latitudes outside [−90, 90].
    pub fn validate(&self) -> Result<(), BhavaError> {
        if !self.jd_ut.is_finite() {
            return Err(BhavaError::InvalidInput("jd_ut must be finite"));
        }
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(BhavaError::InvalidInput(
                "latitude must be finite and in [-90, 90]",
            ));
        }
        if !self.longitude_deg.is_finite() {
            return Err(BhavaError::InvalidInput("longitude must be finite"));
        }
        Ok(())
    }
}
