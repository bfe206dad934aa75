//! Application state shared across sessions.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::session::Session;

/// Application state shared across all sessions.
///
/// This struct is cheaply cloneable via `Arc` and provides read-only access
/// to the configuration and the product catalog.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Load configuration from the environment and the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or catalog is invalid.
    pub fn from_env() -> Result<Self> {
        let config = StorefrontConfig::from_env()?;
        let catalog = Catalog::seed()?;
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Start a shopping session with an empty cart and wishlist.
    #[must_use]
    pub fn start_session(&self) -> Session {
        Session::new(self.clone())
    }
}
