//! Catalog filter/sort pipeline.
//!
//! [`filter_and_sort`] narrows a product list by category, colors, sizes and
//! price, then orders it by a [`SortMode`]. It never fails: an empty result is
//! a normal outcome, and an inverted price range simply matches nothing.

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_core::{CategoryFilter, SortMode};

use super::Product;

/// Upper bound of the default price range.
pub const DEFAULT_PRICE_CEILING: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Active catalog narrowing and sorting choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    /// Empty means "any color".
    pub colors: BTreeSet<String>,
    /// Empty means "any size".
    pub sizes: BTreeSet<String>,
    /// Inclusive lower price bound.
    pub price_min: Decimal,
    /// Inclusive upper price bound.
    pub price_max: Decimal,
    pub sort: SortMode,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_CEILING)
    }
}

impl FilterSpec {
    /// Unfiltered spec with the price range `[0, price_ceiling]`.
    #[must_use]
    pub const fn new(price_ceiling: Decimal) -> Self {
        Self {
            category: CategoryFilter::All,
            colors: BTreeSet::new(),
            sizes: BTreeSet::new(),
            price_min: Decimal::ZERO,
            price_max: price_ceiling,
            sort: SortMode::Featured,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Select the color if unselected, otherwise deselect it.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
    }

    /// Select the size if unselected, otherwise deselect it.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.sizes, size);
    }

    /// Reset every filter to its default. The sort mode is kept.
    pub fn clear(&mut self, price_ceiling: Decimal) {
        *self = Self::new(price_ceiling).with_sort(self.sort);
    }

    /// Returns true if any filter narrows the catalog.
    #[must_use]
    pub fn has_active_filters(&self, price_ceiling: Decimal) -> bool {
        !self.category.is_all()
            || !self.colors.is_empty()
            || !self.sizes.is_empty()
            || self.price_min != Decimal::ZERO
            || self.price_max != price_ceiling
    }

    /// Returns true if `product` passes every filter stage.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category)
            && any_selected(&self.colors, &product.colors)
            && any_selected(&self.sizes, &product.sizes)
            && product.price >= self.price_min
            && product.price <= self.price_max
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_owned());
    }
}

/// An empty selection passes everything; otherwise one value must overlap.
fn any_selected(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

/// Filter `products` by `spec` and order the survivors by `spec.sort`.
///
/// Filtering keeps the input order; every sort is stable.
#[must_use]
pub fn filter_and_sort(products: &[Arc<Product>], spec: &FilterSpec) -> Vec<Arc<Product>> {
    let mut filtered: Vec<Arc<Product>> = products
        .iter()
        .filter(|p| spec.matches(p))
        .cloned()
        .collect();

    match spec.sort {
        SortMode::Featured => filtered.sort_by_key(|p| !p.bestseller),
        // Seed order is oldest first.
        SortMode::Newest => filtered.reverse(),
        SortMode::PriceAscending => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDescending => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    tracing::debug!(
        input = products.len(),
        output = filtered.len(),
        sort = %spec.sort,
        "Filtered catalog"
    );
    filtered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::tests::product;
    use maison_core::Category;

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn seed() -> Vec<Arc<Product>> {
        Catalog::seed().unwrap().products().to_vec()
    }

    #[test]
    fn test_default_spec_puts_bestsellers_first() {
        let result = filter_and_sort(&seed(), &FilterSpec::default());
        assert_eq!(ids(&result), ["1", "3", "4", "6", "8", "2", "5", "7"]);
    }

    #[test]
    fn test_category_accessories() {
        let spec = FilterSpec::default().with_category(Category::Accessories);
        assert_eq!(ids(&filter_and_sort(&seed(), &spec)), ["4"]);
    }

    #[test]
    fn test_price_range_ascending() {
        let spec = FilterSpec::default()
            .with_price_range(Decimal::from(150), Decimal::from(200))
            .with_sort(SortMode::PriceAscending);
        assert_eq!(ids(&filter_and_sort(&seed(), &spec)), ["7", "1", "4"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let spec = FilterSpec::default().with_price_range(Decimal::from(179), Decimal::from(189));
        let result = filter_and_sort(&seed(), &spec);
        assert_eq!(ids(&result), ["1", "7"]);
    }

    #[test]
    fn test_price_descending() {
        let spec = FilterSpec::default().with_sort(SortMode::PriceDescending);
        let result = filter_and_sort(&seed(), &spec);
        assert_eq!(ids(&result), ["8", "4", "1", "7", "5", "3", "6", "2"]);
    }

    #[test]
    fn test_newest_reverses_filtered_order() {
        let spec = FilterSpec::default()
            .with_category(Category::Tops)
            .with_sort(SortMode::Newest);
        assert_eq!(ids(&filter_and_sort(&seed(), &spec)), ["8", "2"]);
    }

    #[test]
    fn test_color_filter_uses_any_overlap() {
        let spec = FilterSpec::default().with_colors(["Sage", "Emerald"]);
        let result = filter_and_sort(&seed(), &spec);
        assert_eq!(ids(&result), ["2", "7"]);
    }

    #[test]
    fn test_size_filter() {
        let spec = FilterSpec::default().with_sizes(["One Size", "28"]);
        let result = filter_and_sort(&seed(), &spec);
        assert_eq!(ids(&result), ["4", "6"]);
    }

    #[test]
    fn test_filters_combine() {
        let spec = FilterSpec::default()
            .with_category(Category::Bottoms)
            .with_colors(["Black"])
            .with_sizes(["XS"]);
        assert_eq!(ids(&filter_and_sort(&seed(), &spec)), ["3"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let spec = FilterSpec::default().with_price_range(Decimal::from(300), Decimal::from(100));
        assert!(filter_and_sort(&seed(), &spec).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let spec = FilterSpec::default()
            .with_category(Category::Dresses)
            .with_colors(["Tan"]);
        assert!(filter_and_sort(&seed(), &spec).is_empty());
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products: Vec<_> = [("a", 50), ("b", 20), ("c", 50), ("d", 20)]
            .into_iter()
            .map(|(id, price)| Arc::new(product(id, Category::Tops, price)))
            .collect();
        let spec = FilterSpec::default().with_sort(SortMode::PriceAscending);
        assert_eq!(ids(&filter_and_sort(&products, &spec)), ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_toggle_color_and_size() {
        let mut spec = FilterSpec::default();
        spec.toggle_color("Black");
        spec.toggle_size("M");
        assert!(spec.colors.contains("Black"));
        assert!(spec.sizes.contains("M"));

        spec.toggle_color("Black");
        spec.toggle_size("M");
        assert!(spec.colors.is_empty());
        assert!(spec.sizes.is_empty());
    }

    #[test]
    fn test_active_filters_and_clear() {
        let ceiling = DEFAULT_PRICE_CEILING;
        let mut spec = FilterSpec::default().with_sort(SortMode::Newest);
        assert!(!spec.has_active_filters(ceiling));

        spec.toggle_size("S");
        assert!(spec.has_active_filters(ceiling));

        let narrowed = FilterSpec::default().with_price_range(Decimal::ZERO, Decimal::from(250));
        assert!(narrowed.has_active_filters(ceiling));

        spec.clear(ceiling);
        assert!(!spec.has_active_filters(ceiling));
        assert_eq!(spec.sort, SortMode::Newest);
    }

    #[test]
    fn test_default_ceiling_is_500() {
        assert_eq!(FilterSpec::default().price_max, Decimal::from(500));
    }
}
