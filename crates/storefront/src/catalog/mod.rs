//! Static product catalog.
//!
//! The catalog is seeded from an embedded JSON document once at startup and
//! is read-only afterwards. Products are handed out as `Arc<Product>` so cart
//! lines and wishlist entries can reference them without copying.

pub mod filter;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use maison_core::{Category, CategoryFilter, ProductId, ReviewId};

pub use filter::{FilterSpec, filter_and_sort};

/// Seed data compiled into the binary.
const SEED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Highest product rating.
const MAX_RATING: f64 = 5.0;

/// Errors raised while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("Product {0} has no colors")]
    NoColors(ProductId),
    #[error("Product {0} has no sizes")]
    NoSizes(ProductId),
    #[error("Product {id} has a negative price")]
    NegativePrice { id: ProductId },
    #[error("Product {id} has an original price below its price")]
    OriginalPriceBelowPrice { id: ProductId },
    #[error("Product {id} rating {rating} is outside 0-5")]
    RatingOutOfRange { id: ProductId, rating: f64 },
    #[error("Review {id} rating {rating} is outside 1-5")]
    ReviewRatingOutOfRange { id: ReviewId, rating: u8 },
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Pre-discount price, present only for items on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: Category,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    pub rating: f64,
    /// Number of reviews behind `rating`.
    #[serde(rename = "reviews")]
    pub review_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
}

impl Product {
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Color preselected on the product page.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// Size used by quick-add from a product card.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Returns true if the product is discounted from its original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Whole-number percentage off the original price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price.filter(|o| *o > self.price)?;
        let ratio = (original - self.price) / original * Decimal::ONE_HUNDRED;
        Some(ratio.round())
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.colors.is_empty() {
            return Err(CatalogError::NoColors(self.id.clone()));
        }
        if self.sizes.is_empty() {
            return Err(CatalogError::NoSizes(self.id.clone()));
        }
        if self.price.is_sign_negative() {
            return Err(CatalogError::NegativePrice {
                id: self.id.clone(),
            });
        }
        if self.original_price.is_some_and(|original| original < self.price) {
            return Err(CatalogError::OriginalPriceBelowPrice {
                id: self.id.clone(),
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }
}

/// A shopper review shown on product pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub author: String,
    pub rating: u8,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub verified: bool,
}

/// Number of products under a category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub filter: CategoryFilter,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Deserialize)]
struct CatalogData {
    products: Vec<Product>,
    #[serde(default)]
    reviews: Vec<Review>,
}

/// The loaded, validated product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    reviews: Vec<Review>,
}

impl Catalog {
    /// Load the built-in seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded data is malformed.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document does not parse or a record
    /// breaks a catalog invariant.
    #[instrument(skip_all, fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        let catalog = Self::new(data.products, data.reviews)?;

        tracing::info!(
            products = catalog.products.len(),
            reviews = catalog.reviews.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate ids or invalid records.
    pub fn new(products: Vec<Product>, reviews: Vec<Review>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        for review in &reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::ReviewRatingOutOfRange {
                    id: review.id.clone(),
                    rating: review.rating,
                });
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            reviews,
        })
    }

    /// All products in seed order (oldest first).
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product that must exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` for unknown ids.
    pub fn require(&self, id: &ProductId) -> Result<&Arc<Product>, CatalogError> {
        self.product(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Products flagged for the home page "featured" row.
    pub fn featured(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter().filter(|p| p.featured)
    }

    pub fn bestsellers(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter().filter(|p| p.bestseller)
    }

    /// Other products from the same category, in seed order.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Product counts for the "all" selection followed by each category.
    #[must_use]
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let all = CategoryCount {
            filter: CategoryFilter::All,
            label: "All",
            count: self.products.len(),
        };

        std::iter::once(all)
            .chain(Category::ALL.into_iter().map(|category| CategoryCount {
                filter: CategoryFilter::Only(category),
                label: category.label(),
                count: self
                    .products
                    .iter()
                    .filter(|p| p.category == category)
                    .count(),
            }))
            .collect()
    }

    /// Distinct colors across the catalog, in first-seen order.
    #[must_use]
    pub fn all_colors(&self) -> Vec<&str> {
        distinct(self.products.iter().flat_map(|p| p.colors.iter()))
    }

    /// Distinct sizes across the catalog, in first-seen order.
    #[must_use]
    pub fn all_sizes(&self) -> Vec<&str> {
        distinct(self.products.iter().flat_map(|p| p.sizes.iter()))
    }

    /// Run the filter/sort pipeline over the whole catalog.
    #[must_use]
    pub fn filter(&self, spec: &FilterSpec) -> Vec<Arc<Product>> {
        filter_and_sort(&self.products, spec)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .map(String::as_str)
        .filter(|value| seen.insert(*value))
        .collect()
}
