//! Time utilities for house computation.
//!
//! This crate provides:
//! - Julian Day ↔ proleptic Gregorian calendar conversions
//! - Earth Rotation Angle and Greenwich Mean Sidereal Time
//! - Local sidereal time in hours
//! - `UtTime`, a validated UT calendar date/time with ISO-8601 parsing

pub mod error;
pub mod julian;
pub mod sidereal;
pub mod ut_time;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, julian_centuries,
};
pub use sidereal::{
    HOURS_PER_TURN, earth_rotation_angle_rad, gmst_rad, local_sidereal_time_hours,
    rad_to_hours,
};
pub use ut_time::UtTime;
