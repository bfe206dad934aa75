//! Product page selection state.
//!
//! The store itself never validates variants. A [`ProductSelection`] holds
//! what the shopper picked on a product page and refuses to add to the cart
//! until a size has been chosen.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Product;
use crate::store::Store;

/// Errors raised while choosing a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select a size")]
    SizeNotSelected,
    #[error("Size {size} is not available for {product}")]
    UnknownSize { product: String, size: String },
    #[error("Color {color} is not available for {product}")]
    UnknownColor { product: String, color: String },
}

/// Size, color and quantity chosen for one product.
#[derive(Debug, Clone)]
pub struct ProductSelection {
    product: Arc<Product>,
    size: Option<String>,
    color: String,
    quantity: u32,
}

impl ProductSelection {
    /// Start with no size, the first color and a quantity of one.
    #[must_use]
    pub fn new(product: Arc<Product>) -> Self {
        let color = product.default_color().unwrap_or_default().to_owned();
        Self {
            product,
            size: None,
            color,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Choose a size offered by the product.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::UnknownSize` if the product has no such size.
    pub fn select_size(&mut self, size: &str) -> Result<(), SelectionError> {
        if !self.product.has_size(size) {
            return Err(SelectionError::UnknownSize {
                product: self.product.name.clone(),
                size: size.to_owned(),
            });
        }
        self.size = Some(size.to_owned());
        Ok(())
    }

    /// Choose a color offered by the product.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::UnknownColor` if the product has no such color.
    pub fn select_color(&mut self, color: &str) -> Result<(), SelectionError> {
        if !self.product.has_color(color) {
            return Err(SelectionError::UnknownColor {
                product: self.product.name.clone(),
                color: color.to_owned(),
            });
        }
        color.clone_into(&mut self.color);
        Ok(())
    }

    pub const fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, never below one.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Set the quantity, never below one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Add the selection to the cart.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::SizeNotSelected` if no size was chosen; the
    /// cart is left unchanged.
    pub fn add_to(&self, store: &mut Store) -> Result<(), SelectionError> {
        let Some(size) = self.size.as_deref() else {
            tracing::warn!(product_id = %self.product.id, "Add to cart without a size");
            return Err(SelectionError::SizeNotSelected);
        };

        store.add_to_cart(&self.product, size, &self.color, self.quantity);
        Ok(())
    }
}

/// Add one unit with the first size and color, as a product card does.
pub fn quick_add(store: &mut Store, product: &Arc<Product>) {
    let (Some(size), Some(color)) = (product.default_size(), product.default_color()) else {
        tracing::warn!(product_id = %product.id, "Product has no default variant");
        return;
    };
    store.add_to_cart(product, size, color, 1);
}
