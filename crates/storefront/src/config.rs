//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the storefront's house rules.
//!
//! - `MAISON_CURRENCY` - Display currency (default: USD)
//! - `MAISON_FREE_SHIPPING_THRESHOLD` - Subtotal that must be exceeded for free shipping (default: 100)
//! - `MAISON_FLAT_SHIPPING_FEE` - Shipping fee below the threshold (default: 10)
//! - `MAISON_TAX_RATE` - Sales tax rate between 0 and 1 (default: 0.1)
//! - `MAISON_PRICE_CEILING` - Upper bound of the default price filter (default: 500)
//! - `MAISON_RELATED_LIMIT` - Related products shown on a product page (default: 4)

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use maison_core::CurrencyCode;

use crate::catalog::filter::DEFAULT_PRICE_CEILING;

const DEFAULT_FREE_SHIPPING_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;
const DEFAULT_FLAT_SHIPPING_FEE: Decimal = Decimal::TEN;
/// 10%
const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
const DEFAULT_RELATED_LIMIT: usize = 4;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontConfig {
    /// Shipping, tax and currency rules
    pub pricing: PricingConfig,
    /// Catalog browsing defaults
    pub catalog: CatalogConfig,
}

/// Order pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Currency used to display amounts
    pub currency: CurrencyCode,
    /// Shipping is free only when the subtotal is strictly above this
    pub free_shipping_threshold: Decimal,
    /// Shipping fee charged at or below the threshold
    pub flat_shipping_fee: Decimal,
    /// Tax rate applied to the subtotal
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_shipping_fee: DEFAULT_FLAT_SHIPPING_FEE,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

/// Catalog browsing defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Upper bound of the default price filter
    pub price_ceiling: Decimal,
    /// Number of related products on a product page
    pub related_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            price_ceiling: DEFAULT_PRICE_CEILING,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pricing = PricingConfig {
            currency: get_or_default(&lookup, "MAISON_CURRENCY", CurrencyCode::default())?,
            free_shipping_threshold: get_amount(
                &lookup,
                "MAISON_FREE_SHIPPING_THRESHOLD",
                DEFAULT_FREE_SHIPPING_THRESHOLD,
            )?,
            flat_shipping_fee: get_amount(
                &lookup,
                "MAISON_FLAT_SHIPPING_FEE",
                DEFAULT_FLAT_SHIPPING_FEE,
            )?,
            tax_rate: get_tax_rate(&lookup, "MAISON_TAX_RATE")?,
        };

        let catalog = CatalogConfig {
            price_ceiling: get_amount(&lookup, "MAISON_PRICE_CEILING", DEFAULT_PRICE_CEILING)?,
            related_limit: get_or_default(&lookup, "MAISON_RELATED_LIMIT", DEFAULT_RELATED_LIMIT)?,
        };

        Ok(Self { pricing, catalog })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset or blank.
fn get_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

/// Parse a non-negative money amount.
fn get_amount<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let amount: Decimal = get_or_default(lookup, key, default)?;
    if amount.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(amount)
}

/// Parse a tax rate in `[0, 1]`.
fn get_tax_rate<F>(lookup: &F, key: &str) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let rate = get_amount(lookup, key, DEFAULT_TAX_RATE)?;
    if rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}
