//! Maison Core - Shared value types.
//!
//! This crate provides the value types used across all Maison components:
//! - `storefront` - Catalog, cart/wishlist store, and checkout state
//! - `cli` - Terminal front-end for browsing and ordering
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no logging,
//! no session state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, categories, sort modes
//!   and order numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
