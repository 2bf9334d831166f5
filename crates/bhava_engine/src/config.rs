//! Engine settings: raw TOML input and its validated form.
//!
//! Per-request names are resolved leniently (an unknown ayanamsa degrades
//! to Lahiri with a warning). Settings are stricter: every name must be
//! known when the configuration is loaded.

use std::error::Error;
use std::fmt::{Display, Formatter};

use bhava_ephem::{DEFAULT_MAX_JD_UT, DEFAULT_MIN_JD_UT, ProviderConfig, SiderealMode};
use serde::Deserialize;

use crate::house_types::{Backend, HouseOptions, HouseRequest, HouseSystem};

/// Settings validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    UnknownAyanamsa(String),
    UnknownHouseSystem(String),
    UnknownBackend(String),
    InvalidRange(&'static str),
    /// The TOML document could not be parsed.
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAyanamsa(name) => write!(f, "unknown ayanamsa '{name}'"),
            Self::UnknownHouseSystem(name) => write!(f, "unknown house system '{name}'"),
            Self::UnknownBackend(name) => write!(f, "unknown backend '{name}'"),
            Self::InvalidRange(msg) => write!(f, "invalid JD range: {msg}"),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings as written by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub ayanamsa: String,
    pub house_system: String,
    pub backend: String,
    pub return_borders: bool,
    pub return_width: bool,
    pub min_jd_ut: Option<f64>,
    pub max_jd_ut: Option<f64>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            ayanamsa: "Lahiri".to_string(),
            house_system: HouseSystem::SignBased.name().to_string(),
            backend: Backend::Auto.name().to_string(),
            return_borders: false,
            return_width: false,
            min_jd_ut: None,
            max_jd_ut: None,
        }
    }
}

/// Validated settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub ayanamsa: SiderealMode,
    pub house_system: HouseSystem,
    pub backend: Backend,
    pub options: HouseOptions,
    pub provider: ProviderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ayanamsa: SiderealMode::Lahiri,
            house_system: HouseSystem::SignBased,
            backend: Backend::Auto,
            options: HouseOptions::default(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Check every field of `raw` and resolve names to their typed values.
pub fn validate_settings(raw: &RawSettings) -> Result<Settings, ConfigError> {
    let ayanamsa = SiderealMode::from_name(&raw.ayanamsa)
        .ok_or_else(|| ConfigError::UnknownAyanamsa(raw.ayanamsa.clone()))?;
    let house_system = HouseSystem::from_name(&raw.house_system)
        .ok_or_else(|| ConfigError::UnknownHouseSystem(raw.house_system.clone()))?;
    let backend = Backend::from_name(&raw.backend)
        .ok_or_else(|| ConfigError::UnknownBackend(raw.backend.clone()))?;

    let provider = ProviderConfig {
        default_mode: ayanamsa,
        min_jd_ut: raw.min_jd_ut.unwrap_or(DEFAULT_MIN_JD_UT),
        max_jd_ut: raw.max_jd_ut.unwrap_or(DEFAULT_MAX_JD_UT),
    };
    if !provider.min_jd_ut.is_finite() || !provider.max_jd_ut.is_finite() {
        return Err(ConfigError::InvalidRange("bounds must be finite"));
    }
    if provider.min_jd_ut >= provider.max_jd_ut {
        return Err(ConfigError::InvalidRange(
            "min_jd_ut must be less than max_jd_ut",
        ));
    }

    Ok(Settings {
        ayanamsa,
        house_system,
        backend,
        options: HouseOptions {
            return_borders: raw.return_borders,
            return_width: raw.return_width,
        },
        provider,
    })
}

impl Settings {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_settings(&raw)
    }

    /// A request at the given moment and place using these settings.
    pub fn request(&self, jd_ut: f64, latitude_deg: f64, longitude_deg: f64) -> HouseRequest {
        HouseRequest {
            jd_ut,
            latitude_deg,
            longitude_deg,
            ayanamsa: self.ayanamsa.name().to_string(),
            house_system: self.house_system,
            backend: self.backend,
            options: self.options,
        }
    }
}
