//! Sidereal zodiac conventions known to the provider.
//!
//! Each convention reduces to its ayanamsa at J2000.0. The value at any
//! other epoch adds the IAU 2006 general precession accumulated since then.

use bhava_frames::{Nutation, general_precession_deg};

/// Sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiderealMode {
    /// Lahiri (Chitrapaksha): Spica at 0° Libra sidereal.
    #[default]
    Lahiri,
    /// Lahiri anchor measured from the true (nutated) equinox.
    TrueLahiri,
    /// Krishnamurti Paddhati.
    Krishnamurti,
    /// B.V. Raman.
    Raman,
    /// Fagan-Bradley synetic vernal point.
    FaganBradley,
    /// δ Cancri at 106° sidereal.
    PushyaPaksha,
    /// Aldebaran at 15°47′ Taurus.
    RohiniPaksha,
    DeLuce,
    DjwalKhul,
    Hipparchos,
    Sassanian,
    DevaDutta,
    UshaShashi,
    /// Sri Yukteshwar, "The Holy Science".
    Yukteshwar,
    JnBhasin,
    ChandraHari,
    Jagganatha,
    SuryaSiddhanta,
    /// Galactic Center at 0° Sagittarius.
    GalacticCenter0Sag,
    /// Aldebaran at 15° Taurus.
    Aldebaran15Tau,
}

const ALL_MODES: [SiderealMode; 20] = [
    SiderealMode::Lahiri,
    SiderealMode::TrueLahiri,
    SiderealMode::Krishnamurti,
    SiderealMode::Raman,
    SiderealMode::FaganBradley,
    SiderealMode::PushyaPaksha,
    SiderealMode::RohiniPaksha,
    SiderealMode::DeLuce,
    SiderealMode::DjwalKhul,
    SiderealMode::Hipparchos,
    SiderealMode::Sassanian,
    SiderealMode::DevaDutta,
    SiderealMode::UshaShashi,
    SiderealMode::Yukteshwar,
    SiderealMode::JnBhasin,
    SiderealMode::ChandraHari,
    SiderealMode::Jagganatha,
    SiderealMode::SuryaSiddhanta,
    SiderealMode::GalacticCenter0Sag,
    SiderealMode::Aldebaran15Tau,
];

impl SiderealMode {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.853,
            Self::TrueLahiri => 23.853,
            Self::Krishnamurti => 23.761,
            Self::Raman => 22.370,
            Self::FaganBradley => 24.736,
            Self::PushyaPaksha => 21.000,
            Self::RohiniPaksha => 24.087,
            Self::DeLuce => 21.619,
            Self::DjwalKhul => 22.883,
            Self::Hipparchos => 21.176,
            Self::Sassanian => 19.765,
            Self::DevaDutta => 22.474,
            Self::UshaShashi => 20.103,
            Self::Yukteshwar => 22.376,
            Self::JnBhasin => 22.376,
            Self::ChandraHari => 23.250,
            Self::Jagganatha => 23.250,
            Self::SuryaSiddhanta => 22.459,
            Self::GalacticCenter0Sag => 26.860,
            Self::Aldebaran15Tau => 24.870,
        }
    }

    /// Whether the ayanamsa is measured from the true equinox of date.
    pub const fn uses_true_equinox(self) -> bool {
        matches!(self, Self::TrueLahiri)
    }

    /// Compact numeric code, stable across releases.
    pub const fn code(self) -> i32 {
        match self {
            Self::Lahiri => 0,
            Self::TrueLahiri => 1,
            Self::Krishnamurti => 2,
            Self::Raman => 3,
            Self::FaganBradley => 4,
            Self::PushyaPaksha => 5,
            Self::RohiniPaksha => 6,
            Self::DeLuce => 7,
            Self::DjwalKhul => 8,
            Self::Hipparchos => 9,
            Self::Sassanian => 10,
            Self::DevaDutta => 11,
            Self::UshaShashi => 12,
            Self::Yukteshwar => 13,
            Self::JnBhasin => 14,
            Self::ChandraHari => 15,
            Self::Jagganatha => 16,
            Self::SuryaSiddhanta => 17,
            Self::GalacticCenter0Sag => 18,
            Self::Aldebaran15Tau => 19,
        }
    }

    /// Inverse of [`SiderealMode::code`].
    pub const fn from_code(code: i32) -> Option<Self> {
        if code < 0 || code >= ALL_MODES.len() as i32 {
            return None;
        }
        Some(ALL_MODES[code as usize])
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
            Self::TrueLahiri => "true_lahiri",
            Self::Krishnamurti => "krishnamurti",
            Self::Raman => "raman",
            Self::FaganBradley => "fagan_bradley",
            Self::PushyaPaksha => "pushya_paksha",
            Self::RohiniPaksha => "rohini_paksha",
            Self::DeLuce => "deluce",
            Self::DjwalKhul => "djwal_khul",
            Self::Hipparchos => "hipparchos",
            Self::Sassanian => "sassanian",
            Self::DevaDutta => "deva_dutta",
            Self::UshaShashi => "usha_shashi",
            Self::Yukteshwar => "yukteshwar",
            Self::JnBhasin => "jn_bhasin",
            Self::ChandraHari => "chandra_hari",
            Self::Jagganatha => "jagganatha",
            Self::SuryaSiddhanta => "surya_siddhanta",
            Self::GalacticCenter0Sag => "galactic_center_0_sag",
            Self::Aldebaran15Tau => "aldebaran_15_tau",
        }
    }

    /// Look up a mode by name.
    ///
    /// Case-insensitive; spaces, `-` and `_` are ignored, so `"Fagan-Bradley"`,
    /// `"fagan bradley"` and `"FAGAN_BRADLEY"` are the same name. `"kp"` is
    /// accepted for Krishnamurti.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = squash(name);
        if key.is_empty() {
            return None;
        }
        if key == "kp" {
            return Some(Self::Krishnamurti);
        }
        ALL_MODES.iter().copied().find(|m| squash(m.name()) == key)
    }

    /// All 20 modes in code order.
    pub const fn all() -> &'static [SiderealMode] {
        &ALL_MODES
    }

    /// Ayanamsa in degrees at `t` Julian centuries since J2000.0.
    ///
    /// `nutation` is only consulted for true-equinox modes.
    pub fn ayanamsa_deg(self, t: f64, nutation: &Nutation) -> f64 {
        let mean = self.reference_j2000_deg() + general_precession_deg(t);
        if self.uses_true_equinox() {
            mean + nutation.dpsi_deg()
        } else {
            mean
        }
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
