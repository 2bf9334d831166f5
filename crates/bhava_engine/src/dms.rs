//! Degrees/minutes/seconds conversion for angles on [0, 360).
//!
//! Rounding is half-up at the requested number of second decimals and is
//! done on an integer count of 10^-p arc-seconds, so minute, degree and
//! 360° carries never leave a "60″" or "360°" behind.

use std::fmt::{Display, Formatter};

use crate::error::BhavaError;
use crate::util::checked_normalize_360;

/// Default number of decimals on the seconds field.
pub const DEFAULT_PRECISION: u8 = 3;

/// Largest accepted seconds precision.
pub const MAX_PRECISION: u8 = 9;

/// Sexagesimal angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
}

/// Convert decimal degrees to DMS with `precision` decimals on the seconds.
///
/// The value is normalized to [0, 360) first. NaN, ±∞ and precisions above
/// [`MAX_PRECISION`] are rejected.
pub fn dec_to_dms(value_deg: f64, precision: u8) -> Result<Dms, BhavaError> {
    if precision > MAX_PRECISION {
        return Err(BhavaError::InvalidInput("DMS precision must be in 0..=9"));
    }
    let x = checked_normalize_360(value_deg)?;

    let scale = 10_u64.pow(u32::from(precision));
    let per_minute = 60 * scale;
    let per_degree = 3600 * scale;

    // round half up, not half-to-even
    let mut units = (x * 3600.0 * scale as f64 + 0.5).floor() as u64;
    if units >= 360 * per_degree {
        units -= 360 * per_degree;
    }

    let degrees = (units / per_degree) as u16;
    let rem = units % per_degree;
    let minutes = (rem / per_minute) as u8;
    let seconds = (rem % per_minute) as f64 / scale as f64;

    Ok(Dms {
        degrees,
        minutes,
        seconds,
    })
}

/// Decimal degrees from a DMS triple.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Rendering options for [`format_dms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmsStyle {
    pub precision: u8,
    /// Pad minutes and whole seconds to two digits.
    pub zero_pad: bool,
    /// Degree, minute and second symbols.
    pub symbols: (String, String, String),
}

impl Default for DmsStyle {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            zero_pad: true,
            symbols: ("°".into(), "′".into(), "″".into()),
        }
    }
}

impl DmsStyle {
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn unpadded(mut self) -> Self {
        self.zero_pad = false;
        self
    }

    /// Plain ASCII symbols: `d`, `'` and `"`.
    pub fn ascii(mut self) -> Self {
        self.symbols = ("d".into(), "'".into(), "\"".into());
        self
    }
}

/// Render `dms` with `style`, e.g. `143° 02′ 06.191″`.
pub fn render_dms(dms: &Dms, style: &DmsStyle) -> String {
    let (deg_sym, min_sym, sec_sym) = &style.symbols;
    let p = usize::from(style.precision);
    let (minutes, seconds) = if style.zero_pad {
        // two integer digits, a point, then p decimals
        let width = if p > 0 { 3 + p } else { 2 };
        (
            format!("{:02}", dms.minutes),
            format!("{:0width$.p$}", dms.seconds),
        )
    } else {
        (dms.minutes.to_string(), format!("{:.p$}", dms.seconds))
    };
    format!(
        "{}{deg_sym} {minutes}{min_sym} {seconds}{sec_sym}",
        dms.degrees
    )
}

/// Convert and render in one step.
pub fn format_dms(value_deg: f64, style: &DmsStyle) -> Result<String, BhavaError> {
    let dms = dec_to_dms(value_deg, style.precision)?;
    Ok(render_dms(&dms, style))
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(usize::from(DEFAULT_PRECISION));
        write!(
            f,
            "{}° {:02}′ {:0width$.p$}″",
            self.degrees,
            self.minutes,
            self.seconds,
            width = if p > 0 { 3 + p } else { 2 },
        )
    }
}
