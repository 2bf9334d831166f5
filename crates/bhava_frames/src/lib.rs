//! Earth orientation quantities used by the house engine.
//!
//! Provides the IAU 2006 general precession and mean obliquity and the
//! IAU 2000B nutation series, from which true obliquity and the equation
//! of the equinoxes follow.

pub mod nutation;
pub mod obliquity;
pub mod precession;

pub use nutation::{Nutation, equation_of_equinoxes_arcsec, fundamental_arguments};
pub use obliquity::{
    OBLIQUITY_J2000_ARCSEC, OBLIQUITY_J2000_DEG, mean_obliquity_arcsec,
    mean_obliquity_deg, true_obliquity_deg,
};
pub use precession::{general_precession_arcsec, general_precession_deg};
