//! Conversions between house borders and house cusps (midpoints).

use crate::util::{arc_forward, normalize_360};

/// Arc widths between consecutive borders; `width[i]` spans house i+1.
pub fn widths_from_borders(borders: &[f64; 12]) -> [f64; 12] {
    std::array::from_fn(|i| arc_forward(borders[i], borders[(i + 1) % 12]))
}

/// Midpoint of each house from its two borders.
pub fn cusps_from_borders(borders: &[f64; 12]) -> [f64; 12] {
    let widths = widths_from_borders(borders);
    std::array::from_fn(|i| normalize_360(borders[i] + widths[i] / 2.0))
}

/// Border of each house as the circular midpoint of the previous cusp and its own.
pub fn borders_from_cusps(cusps: &[f64; 12]) -> [f64; 12] {
    std::array::from_fn(|i| {
        let prev = cusps[(i + 11) % 12];
        normalize_360(prev + arc_forward(prev, cusps[i]) / 2.0)
    })
}
