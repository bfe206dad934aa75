//! Catalog sort modes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Ordering applied to a filtered product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Bestsellers first, seed order otherwise.
    #[default]
    Featured,
    /// Most recently added first.
    Newest,
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
}

impl SortMode {
    /// All sort modes in menu order.
    pub const ALL: [Self; 4] = [
        Self::Featured,
        Self::Newest,
        Self::PriceAscending,
        Self::PriceDescending,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Newest => "Newest",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort mode is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0}")]
pub struct ParseSortModeError(pub String);

impl std::str::FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `price-low` / `price-high` are the sort menu values.
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" => Ok(Self::Featured),
            "newest" => Ok(Self::Newest),
            "price-ascending" | "price-low" => Ok(Self::PriceAscending),
            "price-descending" | "price-high" => Ok(Self::PriceDescending),
            _ => Err(ParseSortModeError(s.to_owned())),
        }
    }
}
