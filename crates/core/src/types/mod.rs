//! Core types for Maison.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod sort;

pub use category::{Category, CategoryFilter, ParseCategoryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{OrderNumber, OrderNumberError};
pub use price::{CurrencyCode, ParseCurrencyError, Price};
pub use sort::{ParseSortModeError, SortMode};
