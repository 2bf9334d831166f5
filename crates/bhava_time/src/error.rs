//! Error types for calendar and time parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation or date/time parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Text did not match `YYYY-MM-DDThh:mm:ss[Z]`.
    Parse(String),
    /// A calendar field is out of range.
    InvalidDate(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "date/time parse error: {msg}"),
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
        }
    }
}

impl Error for TimeError {}
