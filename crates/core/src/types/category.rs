//! Catalog categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Product category.
///
/// The set is closed: every catalog record belongs to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tops,
    Bottoms,
    Outerwear,
    Dresses,
    Accessories,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Tops,
        Self::Bottoms,
        Self::Outerwear,
        Self::Dresses,
        Self::Accessories,
    ];

    /// Machine identifier (`"tops"`, `"bottoms"`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Outerwear => "outerwear",
            Self::Dresses => "dresses",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tops => "Tops",
            Self::Bottoms => "Bottoms",
            Self::Outerwear => "Outerwear",
            Self::Dresses => "Dresses",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

/// Category selection in a catalog filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if a product in `category` passes this selection.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
        }
    }

    /// Returns true for the "all" selection.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Dresses".parse::<Category>().unwrap(), Category::Dresses);
    }

    #[test]
    fn test_unknown_category() {
        let err = "shoes".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: shoes");
    }

    #[test]
    fn test_category_serde_uses_identifier() {
        let json = serde_json::to_string(&Category::Outerwear).unwrap();
        assert_eq!(json, "\"outerwear\"");
    }

    #[test]
    fn test_filter_all_matches_everything() {
        let filter: CategoryFilter = "all".parse().unwrap();
        assert!(filter.is_all());
        assert!(Category::ALL.into_iter().all(|c| filter.matches(c)));
    }

    #[test]
    fn test_filter_only_matches_one() {
        let filter: CategoryFilter = "accessories".parse().unwrap();
        assert!(filter.matches(Category::Accessories));
        assert!(!filter.matches(Category::Tops));
        assert_eq!(filter.to_string(), "accessories");
    }
}
