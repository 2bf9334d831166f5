//! Sidereal house-system engine.
//!
//! Given a UT Julian Day and a geographic position, computes the chart
//! angles and the twelve houses under one of three systems:
//!
//! - `sign-based` (whole-sign)
//! - `arc-trisection` (Śrīpati / Porphyry)
//! - `time-division` (Placidus, with arc-trisection fallback where it is
//!   undefined)
//!
//! All astronomy goes through a [`bhava_ephem::Ephemeris`] handle; the
//! engine itself only does plane geometry on longitudes.
//!
//! ```no_run
//! use bhava_engine::{HouseRequest, HouseSystem, compute_houses};
//!
//! let request = HouseRequest::new(2_460_000.5, 28.6139, 77.2090)
//!     .with_system(HouseSystem::TimeDivision)
//!     .with_borders();
//! let response = compute_houses(&request)?;
//! println!("{:?}", response.houses.cusps());
//! # Ok::<(), bhava_engine::BhavaError>(())
//! ```

pub mod assemble;
pub mod axes;
pub mod ayanamsa;
pub mod border;
pub mod classification;
pub mod config;
pub mod dms;
pub mod error;
pub mod geometry;
pub mod house_types;
pub mod houses;
pub mod util;

pub use assemble::{
    AyanamsaInfo, Diagnostics, HouseArrays, HouseResponse, Houses, Meta, Status, assemble,
};
pub use axes::{Axes, compute_axes};
pub use ayanamsa::{PRIMARY_MODE, ResolvedAyanamsa, resolve_ayanamsa};
pub use border::{borders_from_cusps, cusps_from_borders, widths_from_borders};
pub use classification::{Classification, HouseCategory, categories_of};
pub use config::{ConfigError, RawSettings, Settings, validate_settings};
pub use dms::{DEFAULT_PRECISION, Dms, DmsStyle, dec_to_dms, dms_to_deg, format_dms, render_dms};
pub use error::BhavaError;
pub use geometry::Geometry;
pub use house_types::{Backend, HouseOptions, HouseRequest, HouseSystem};
pub use houses::{
    arc_trisection_houses, compute_houses, compute_houses_with, sripati_cusps,
    time_division_houses, whole_sign_borders, whole_sign_houses,
};
pub use util::{arc_forward, normalize_360, opposite, to_sidereal};
