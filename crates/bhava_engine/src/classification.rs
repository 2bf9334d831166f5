//! Traditional house groupings.

use serde::Serialize;

/// House categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseCategory {
    /// Angular houses.
    Kendra,
    /// Trines.
    Trikona,
    /// Houses of growth.
    Upachaya,
    /// Houses of difficulty.
    Dusthana,
}

const ALL_CATEGORIES: [HouseCategory; 4] = [
    HouseCategory::Kendra,
    HouseCategory::Trikona,
    HouseCategory::Upachaya,
    HouseCategory::Dusthana,
];

impl HouseCategory {
    pub const fn all() -> &'static [HouseCategory] {
        &ALL_CATEGORIES
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Kendra => "kendra",
            Self::Trikona => "trikona",
            Self::Upachaya => "upachaya",
            Self::Dusthana => "dusthana",
        }
    }

    /// House numbers (1-12) in this category.
    pub const fn houses(self) -> &'static [u8] {
        match self {
            Self::Kendra => &[1, 4, 7, 10],
            Self::Trikona => &[1, 5, 9],
            Self::Upachaya => &[3, 6, 10, 11],
            Self::Dusthana => &[6, 8, 12],
        }
    }
}

/// Categories a house (1-12) belongs to. Empty for out-of-range numbers.
pub fn categories_of(house: u8) -> Vec<HouseCategory> {
    ALL_CATEGORIES
        .iter()
        .copied()
        .filter(|c| c.houses().contains(&house))
        .collect()
}

/// The category table as it appears in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub kendra: &'static [u8],
    pub trikona: &'static [u8],
    pub upachaya: &'static [u8],
    pub dusthana: &'static [u8],
}

impl Classification {
    pub const STANDARD: Classification = Classification {
        kendra: HouseCategory::Kendra.houses(),
        trikona: HouseCategory::Trikona.houses(),
        upachaya: HouseCategory::Upachaya.houses(),
        dusthana: HouseCategory::Dusthana.houses(),
    };
}

impl Default for Classification {
    fn default() -> Self {
        Self::STANDARD
    }
}
