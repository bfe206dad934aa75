//! Maison storefront library.
//!
//! Catalog browsing, the filter/sort pipeline, cart and wishlist state,
//! product selection and checkout for the Maison clothing store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod selection;
pub mod session;
pub mod state;
pub mod store;

pub use catalog::{Catalog, CatalogError, FilterSpec, Product, Review, filter_and_sort};
pub use checkout::{Checkout, CheckoutError, CheckoutStep, OrderConfirmation, OrderSummary};
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use selection::{ProductSelection, SelectionError};
pub use session::Session;
pub use state::AppState;
pub use store::{CartLine, Store};
