//! Response types and their assembly.

use serde::Serialize;

use crate::axes::Axes;
use crate::classification::Classification;
use crate::geometry::Geometry;
use crate::house_types::{Backend, HouseSystem};

/// Computation status, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ok,
    /// A requested setting was replaced by its default.
    Warn,
    /// A different algorithm than requested produced the houses.
    Fallback,
}

impl Status {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Fallback => "fallback",
        }
    }
}

/// Status and notes collected while serving one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    status: Status,
    notes: Vec<String>,
}

impl Diagnostics {
    /// Record a note; the status only ever rises (ok < warn < fallback).
    pub fn raise(&mut self, status: Status, note: impl Into<String>) {
        self.status = self.status.max(status);
        self.notes.push(note.into());
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Notes joined with `"; "`, or `None` when there are none.
    pub fn notes(&self) -> Option<String> {
        (!self.notes.is_empty()).then(|| self.notes.join("; "))
    }
}

/// Resolved ayanamsa as reported in [`Meta`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AyanamsaInfo {
    pub name: &'static str,
    pub value_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub house_system: HouseSystem,
    /// Backend that actually produced the houses.
    pub backend: Backend,
    pub ayanamsa: AyanamsaInfo,
    pub epsilon_deg: f64,
    pub ramc_deg: f64,
    pub lst_hours: f64,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The twelve-entry house arrays; index 0 is house 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseArrays {
    pub cusps_deg_sid: [f64; 12],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders_deg_sid: Option<[f64; 12]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_deg: Option<[f64; 12]>,
}

/// House payload, tagged by kind.
///
/// Sign-based borders are sign boundaries; cuspal borders are computed
/// house boundaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Houses {
    #[serde(rename = "sign-based")]
    SignBased(HouseArrays),
    #[serde(rename = "cuspal")]
    Cuspal(HouseArrays),
}

impl Houses {
    pub fn arrays(&self) -> &HouseArrays {
        match self {
            Self::SignBased(a) | Self::Cuspal(a) => a,
        }
    }

    pub fn cusps(&self) -> &[f64; 12] {
        &self.arrays().cusps_deg_sid
    }

    pub fn borders(&self) -> Option<&[f64; 12]> {
        self.arrays().borders_deg_sid.as_ref()
    }

    pub fn widths(&self) -> Option<&[f64; 12]> {
        self.arrays().width_deg.as_ref()
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SignBased(_) => "sign-based",
            Self::Cuspal(_) => "cuspal",
        }
    }
}

/// Full result of a house computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseResponse {
    pub meta: Meta,
    pub angles: Axes,
    pub houses: Houses,
    pub classification: Classification,
}

/// Compose a response from its computed parts.
pub fn assemble(
    house_system: HouseSystem,
    backend: Backend,
    ayanamsa_name: &'static str,
    geometry: &Geometry,
    axes: Axes,
    houses: Houses,
    diagnostics: &Diagnostics,
) -> HouseResponse {
    HouseResponse {
        meta: Meta {
            house_system,
            backend,
            ayanamsa: AyanamsaInfo {
                name: ayanamsa_name,
                value_deg: geometry.ayanamsa_deg,
            },
            epsilon_deg: geometry.epsilon_deg,
            ramc_deg: geometry.ramc_deg,
            lst_hours: geometry.lst_hours,
            status: diagnostics.status(),
            notes: diagnostics.notes(),
        },
        angles: axes,
        houses,
        classification: Classification::STANDARD,
    }
}
