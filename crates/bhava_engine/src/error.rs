//! Error types for house computation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use bhava_ephem::EphemerisError;

use crate::config::ConfigError;

/// Errors that abort a house request.
///
/// Unknown ayanamsa names and undefined Placidus houses are not errors;
/// they degrade the response status instead.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BhavaError {
    /// A caller-supplied value is non-finite or out of range.
    InvalidInput(&'static str),
    /// The ephemeris provider failed.
    Ephemeris(EphemerisError),
    /// Settings failed validation.
    Config(ConfigError),
}

impl Display for BhavaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Ephemeris(e) => write!(f, "calculation failed: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl Error for BhavaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ephemeris(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<EphemerisError> for BhavaError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}

impl From<ConfigError> for BhavaError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
