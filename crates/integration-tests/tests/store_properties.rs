//! Property-based tests for cart, wishlist and pipeline invariants.
//!
//! - Adding the same key twice merges into one line with summed quantity
//! - Updating a line to zero or less removes it
//! - Toggling the wishlist twice restores it
//! - `cart_total` and `cart_count` equal sums over the lines after every step
//! - The pipeline returns exactly the matching products, correctly ordered

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use maison_core::{Category, CategoryFilter, SortMode};
use maison_integration_tests::seed_app;
use maison_storefront::{FilterSpec, Product, Store, filter_and_sort};

// =============================================================================
// Strategy helpers
// =============================================================================

const SIZES: [&str; 3] = ["S", "M", "L"];
const COLORS: [&str; 3] = ["Black", "Beige", "Cream"];

fn products() -> Vec<Arc<Product>> {
    seed_app().catalog().products().to_vec()
}

#[derive(Debug, Clone)]
enum Op {
    Add {
        product: usize,
        size: usize,
        color: usize,
        quantity: u32,
    },
    Update {
        product: usize,
        size: usize,
        color: usize,
        quantity: i64,
    },
    Remove {
        product: usize,
        size: usize,
        color: usize,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..8usize, 0..3usize, 0..3usize, 0..5u32).prop_map(|(product, size, color, quantity)| {
            Op::Add {
                product,
                size,
                color,
                quantity,
            }
        }),
        (0..8usize, 0..3usize, 0..3usize, -3..6i64).prop_map(
            |(product, size, color, quantity)| Op::Update {
                product,
                size,
                color,
                quantity,
            }
        ),
        (0..8usize, 0..3usize, 0..3usize).prop_map(|(product, size, color)| Op::Remove {
            product,
            size,
            color,
        }),
    ]
}

type Key = (usize, usize, usize);

/// Apply `op` to both the store and a simple map model.
fn apply(store: &mut Store, model: &mut HashMap<Key, u32>, catalog: &[Arc<Product>], op: &Op) {
    match *op {
        Op::Add {
            product,
            size,
            color,
            quantity,
        } => {
            store.add_to_cart(&catalog[product], SIZES[size], COLORS[color], quantity);
            if quantity > 0 {
                *model.entry((product, size, color)).or_default() += quantity;
            }
        }
        Op::Update {
            product,
            size,
            color,
            quantity,
        } => {
            let id = &catalog[product].id;
            store.update_quantity(id, SIZES[size], COLORS[color], quantity);
            let key = (product, size, color);
            if quantity <= 0 {
                model.remove(&key);
            } else if let Some(existing) = model.get_mut(&key) {
                *existing = u32::try_from(quantity).unwrap();
            }
        }
        Op::Remove {
            product,
            size,
            color,
        } => {
            let id = &catalog[product].id;
            store.remove_from_cart(id, SIZES[size], COLORS[color]);
            model.remove(&(product, size, color));
        }
    }
}

fn spec_strategy() -> impl Strategy<Value = FilterSpec> {
    let category = prop_oneof![
        Just(CategoryFilter::All),
        prop::sample::select(Category::ALL.to_vec()).prop_map(CategoryFilter::Only),
    ];
    let colors = prop::collection::btree_set(
        prop::sample::select(vec!["Black", "Beige", "Cream", "White", "Navy"]),
        0..3,
    );
    let sizes = prop::collection::btree_set(
        prop::sample::select(vec!["XS", "M", "XL", "28", "One Size"]),
        0..3,
    );
    let sort = prop::sample::select(SortMode::ALL.to_vec());

    (category, colors, sizes, 0..300i64, 0..600i64, sort).prop_map(
        |(category, colors, sizes, min, max, sort)| {
            FilterSpec::default()
                .with_category(category)
                .with_colors(colors)
                .with_sizes(sizes)
                .with_price_range(Decimal::from(min), Decimal::from(max))
                .with_sort(sort)
        },
    )
}

/// Filter stages evaluated straight from the product fields.
fn passes_filters(spec: &FilterSpec, product: &Product) -> bool {
    let category = match spec.category {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => product.category == category,
    };
    let color = spec.colors.is_empty() || product.colors.iter().any(|c| spec.colors.contains(c));
    let size = spec.sizes.is_empty() || product.sizes.iter().any(|s| spec.sizes.contains(s));
    let price = spec.price_min <= product.price && product.price <= spec.price_max;

    category && color && size && price
}

// =============================================================================
// Store properties
// =============================================================================

proptest! {
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let catalog = products();
        let mut store = Store::new();
        let mut model = HashMap::new();

        for op in &ops {
            apply(&mut store, &mut model, &catalog, op);

            prop_assert_eq!(store.cart_lines().len(), model.len());
            for line in store.cart_lines() {
                prop_assert!(line.quantity >= 1);
            }

            let expected_count: u64 = model.values().map(|q| u64::from(*q)).sum();
            prop_assert_eq!(store.cart_count(), expected_count);

            let expected_total: Decimal = model
                .iter()
                .map(|((product, _, _), quantity)| {
                    catalog[*product].price * Decimal::from(*quantity)
                })
                .sum();
            prop_assert_eq!(store.cart_total(), expected_total);
        }
    }

    #[test]
    fn prop_add_twice_merges(
        product in 0..8usize,
        size in 0..3usize,
        color in 0..3usize,
        first in 1..10u32,
        second in 1..10u32,
    ) {
        let catalog = products();
        let mut store = Store::new();
        store.add_to_cart(&catalog[product], SIZES[size], COLORS[color], first);
        store.add_to_cart(&catalog[product], SIZES[size], COLORS[color], second);

        prop_assert_eq!(store.cart_lines().len(), 1);
        prop_assert_eq!(store.cart_lines()[0].quantity, first + second);
    }

    #[test]
    fn prop_update_non_positive_removes(
        product in 0..8usize,
        quantity in i64::MIN..=0,
    ) {
        let catalog = products();
        let mut store = Store::new();
        store.add_to_cart(&catalog[product], "M", "Black", 3);
        store.update_quantity(&catalog[product].id, "M", "Black", quantity);
        prop_assert!(store.is_cart_empty());
    }

    #[test]
    fn prop_wishlist_toggle_is_involution(
        seeded in prop::collection::vec(0..8usize, 0..8),
        product in 0..8usize,
    ) {
        let catalog = products();
        let mut store = Store::new();
        for index in seeded {
            if !store.is_in_wishlist(&catalog[index].id) {
                store.toggle_wishlist(&catalog[index]);
            }
        }
        let before: Vec<_> = store.wishlist().iter().map(|p| p.id.clone()).collect();

        let added = store.toggle_wishlist(&catalog[product]);
        prop_assert_eq!(added, !before.contains(&catalog[product].id));
        store.toggle_wishlist(&catalog[product]);

        let after: Vec<_> = store.wishlist().iter().map(|p| p.id.clone()).collect();
        let mut before_sorted = before;
        let mut after_sorted = after;
        before_sorted.sort();
        after_sorted.sort();
        prop_assert_eq!(before_sorted, after_sorted);
    }
}

// =============================================================================
// Pipeline properties
// =============================================================================

proptest! {
    #[test]
    fn prop_pipeline_returns_exactly_matching(spec in spec_strategy()) {
        let catalog = products();
        let result = filter_and_sort(&catalog, &spec);

        let mut expected: Vec<_> = catalog
            .iter()
            .filter(|p| passes_filters(&spec, p))
            .map(|p| p.id.clone())
            .collect();
        let mut actual: Vec<_> = result.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_pipeline_orders_by_sort_mode(spec in spec_strategy()) {
        let catalog = products();
        let result = filter_and_sort(&catalog, &spec);
        let position = |p: &Arc<Product>| catalog.iter().position(|c| c.id == p.id).unwrap();

        for pair in result.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match spec.sort {
                SortMode::PriceAscending => prop_assert!(a.price <= b.price),
                SortMode::PriceDescending => prop_assert!(a.price >= b.price),
                SortMode::Newest => prop_assert!(position(a) > position(b)),
                SortMode::Featured => {
                    prop_assert!(a.bestseller || !b.bestseller);
                    if a.bestseller == b.bestseller {
                        prop_assert!(position(a) < position(b));
                    }
                }
            }
        }
    }
}
