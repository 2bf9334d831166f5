//! Mapping of ayanamsa names to provider sidereal modes.

use bhava_ephem::SiderealMode;
use tracing::warn;

/// Convention used when a name is not recognised.
pub const PRIMARY_MODE: SiderealMode = SiderealMode::Lahiri;

/// Outcome of resolving a requested ayanamsa name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAyanamsa {
    pub mode: SiderealMode,
    /// Set when the requested name was unknown and [`PRIMARY_MODE`] was used.
    pub warning: Option<String>,
}

impl ResolvedAyanamsa {
    pub fn name(&self) -> &'static str {
        self.mode.name()
    }
}

/// Resolve a requested ayanamsa name. Never fails.
///
/// Unknown names fall back to Lahiri with a warning note naming the
/// rejected value.
pub fn resolve_ayanamsa(requested: &str) -> ResolvedAyanamsa {
    match SiderealMode::from_name(requested) {
        Some(mode) => ResolvedAyanamsa {
            mode,
            warning: None,
        },
        None => {
            warn!(requested, fallback = PRIMARY_MODE.name(), "unknown ayanamsa");
            ResolvedAyanamsa {
                mode: PRIMARY_MODE,
                warning: Some(format!("unknown ayanamsa '{requested}', fallback to Lahiri")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        let r = resolve_ayanamsa("Lahiri");
        assert_eq!(r.mode, SiderealMode::Lahiri);
        assert!(r.warning.is_none());

        let r = resolve_ayanamsa("Krishnamurti");
        assert_eq!(r.mode, SiderealMode::Krishnamurti);
        assert_eq!(r.name(), "krishnamurti");

        assert_eq!(resolve_ayanamsa("kp").mode, SiderealMode::Krishnamurti);
    }

    #[test]
    fn unknown_name_degrades_to_lahiri() {
        let r = resolve_ayanamsa("Babylonian-X");
        assert_eq!(r.mode, SiderealMode::Lahiri);
        assert_eq!(
            r.warning.as_deref(),
            Some("unknown ayanamsa 'Babylonian-X', fallback to Lahiri")
        );
    }

    #[test]
    fn empty_name_degrades() {
        assert!(resolve_ayanamsa("").warning.is_some());
    }
}
