//! Unified error handling.
//!
//! Provides a unified `AppError` type wrapping every storefront error so
//! callers can propagate with `?` and decide what to show the shopper.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::selection::SelectionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog data is invalid or a lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product variant selection was incomplete or invalid.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A checkout step failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl AppError {
    /// True for errors caused by shopper input rather than broken data or setup.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Catalog(err) => matches!(err, CatalogError::ProductNotFound(_)),
            Self::Selection(_) | Self::Checkout(_) => true,
        }
    }

    /// Message safe to show a shopper.
    ///
    /// Setup and data errors are logged and replaced with a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        if !self.is_user_error() {
            tracing::error!(error = %self, "Storefront error");
            return "Something went wrong, please try again".to_string();
        }

        match self {
            Self::Catalog(err) => err.to_string(),
            Self::Selection(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Config(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
