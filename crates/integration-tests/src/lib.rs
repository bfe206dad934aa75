//! Integration tests for the Maison storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maison-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pipeline` - Filter and sort behavior over the seed catalog
//! - `shopping_session` - Browsing, cart, wishlist and checkout end to end
//! - `store_properties` - Property tests for cart and wishlist invariants
//!
//! This crate holds the shared fixtures.

use std::sync::Arc;

use secrecy::SecretString;

use maison_storefront::checkout::{PaymentForm, ShippingForm};
use maison_storefront::{AppState, Catalog, Product, StorefrontConfig};

/// App state over the seed catalog with default configuration.
///
/// # Panics
///
/// Panics if the embedded seed catalog is invalid.
#[must_use]
pub fn seed_app() -> AppState {
    let catalog = Catalog::seed().expect("seed catalog should load");
    AppState::new(StorefrontConfig::default(), catalog)
}

/// Product ids in result order.
#[must_use]
pub fn ids(products: &[Arc<Product>]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

/// A fully filled-in shipping form.
#[must_use]
pub fn shipping_form() -> ShippingForm {
    ShippingForm {
        email: "you@example.com".to_string(),
        first_name: "Jessica".to_string(),
        last_name: "Chen".to_string(),
        address: "200 Market St".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        zip_code: "94105".to_string(),
        ..ShippingForm::default()
    }
}

/// A fully filled-in payment form.
#[must_use]
pub fn payment_form() -> PaymentForm {
    PaymentForm {
        card_number: SecretString::from("4242 4242 4242 4242".to_string()),
        card_name: "Jessica Chen".to_string(),
        expiry_date: "08/28".to_string(),
        cvv: SecretString::from("737".to_string()),
    }
}
