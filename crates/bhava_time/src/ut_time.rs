//! Calendar date/time in Universal Time.
//!
//! `UtTime` is the input form accepted by the command line; the engine itself
//! works on UT Julian Days. Civil-time offsets are the caller's concern.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// UT calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtTime {
    /// Build a validated UT calendar time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if !(1..=31).contains(&day) {
            return Err(TimeError::InvalidDate("day must be in 1..=31"));
        }
        if hour > 23 {
            return Err(TimeError::InvalidDate("hour must be in 0..=23"));
        }
        if minute > 59 {
            return Err(TimeError::InvalidDate("minute must be in 0..=59"));
        }
        if !second.is_finite() || !(0.0..61.0).contains(&second) {
            return Err(TimeError::InvalidDate("second must be in [0, 61)"));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Julian Day (UT).
    pub fn to_jd_ut(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Calendar form of a UT Julian Day.
    pub fn from_jd_ut(jd_ut: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd_ut);
        let day = day_frac.floor() as u32;
        // Millisecond rounding keeps exact minutes from surfacing as :59.999.
        let total_seconds = ((day_frac.fract() * SECONDS_PER_DAY * 1000.0).round() / 1000.0)
            .min(SECONDS_PER_DAY - 0.001);
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl FromStr for UtTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DDThh:mm:ss` with an optional trailing `Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('Z');
        let (date, time) = s
            .split_once('T')
            .ok_or_else(|| TimeError::Parse(format!("expected YYYY-MM-DDThh:mm:ss, got {s}")))?;

        let date_parts: Vec<&str> = date.split('-').collect();
        let time_parts: Vec<&str> = time.split(':').collect();
        if date_parts.len() != 3 || time_parts.len() != 3 {
            return Err(TimeError::Parse(format!("invalid date/time format: {s}")));
        }

        let field = |v: &str| v.parse::<u32>().map_err(|e| TimeError::Parse(format!("{v}: {e}")));
        let year: i32 = date_parts[0]
            .parse()
            .map_err(|e| TimeError::Parse(format!("{}: {e}", date_parts[0])))?;
        let second: f64 = time_parts[2]
            .parse()
            .map_err(|e| TimeError::Parse(format!("{}: {e}", time_parts[2])))?;

        Self::new(
            year,
            field(date_parts[1])?,
            field(date_parts[2])?,
            field(time_parts[0])?,
            field(time_parts[1])?,
            second,
        )
    }
}

impl Display for UtTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
