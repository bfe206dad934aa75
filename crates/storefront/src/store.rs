//! Cart and wishlist state for one shopping session.
//!
//! A [`Store`] is a plain owned value: it is created empty when a session
//! starts, mutated through `&mut self`, and dropped with the session.
//! Derived values (`cart_total`, `cart_count`) are computed from the current
//! lines on every call and never cached.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use maison_core::ProductId;

use crate::catalog::Product;

/// One cart entry, keyed by product, size and color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Arc<Product>,
    pub selected_size: String,
    pub selected_color: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Returns true if this line has the identity key `(product_id, size, color)`.
    #[must_use]
    pub fn is(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product.id == product_id
            && self.selected_size == size
            && self.selected_color == color
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Cart and wishlist container.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Store {
    cart: Vec<CartLine>,
    wishlist: Vec<Arc<Product>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of a product variant.
    ///
    /// Merges into the existing line with the same product, size and color,
    /// or appends a new line. A zero quantity changes nothing.
    #[instrument(
        level = "debug",
        skip(self, product),
        fields(product_id = %product.id)
    )]
    pub fn add_to_cart(&mut self, product: &Arc<Product>, size: &str, color: &str, quantity: u32) {
        if quantity == 0 {
            tracing::debug!("Ignoring add of zero quantity");
            return;
        }

        if let Some(line) = self.line_mut(&product.id, size, color) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.cart.push(CartLine {
            product: Arc::clone(product),
            selected_size: size.to_owned(),
            selected_color: color.to_owned(),
            quantity,
        });
    }

    /// Remove the line with the given key. Absent lines are not an error.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId, size: &str, color: &str) {
        let before = self.cart.len();
        self.cart.retain(|line| !line.is(product_id, size, color));
        if self.cart.len() == before {
            tracing::debug!("No matching cart line to remove");
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) {
        let Ok(quantity @ 1..) = u32::try_from(quantity.min(i64::from(u32::MAX))) else {
            self.remove_from_cart(product_id, size, color);
            return;
        };

        match self.line_mut(product_id, size, color) {
            Some(line) => line.quantity = quantity,
            None => tracing::debug!("No matching cart line to update"),
        }
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn cart_lines(&self) -> &[CartLine] {
        &self.cart
    }

    /// Look up a line by its key.
    #[must_use]
    pub fn cart_line(&self, product_id: &ProductId, size: &str, color: &str) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.is(product_id, size, color))
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId, size: &str, color: &str) -> Option<&mut CartLine> {
        self.cart
            .iter_mut()
            .find(|line| line.is(product_id, size, color))
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add the product to the wishlist, or remove it if already there.
    ///
    /// Returns true if the product is in the wishlist afterwards.
    #[instrument(level = "debug", skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_wishlist(&mut self, product: &Arc<Product>) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|p| p.id != product.id);
        if self.wishlist.len() < before {
            return false;
        }

        self.wishlist.push(Arc::clone(product));
        true
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.iter().any(|p| &p.id == product_id)
    }

    /// Wishlist entries in the order they were added.
    #[must_use]
    pub fn wishlist(&self) -> &[Arc<Product>] {
        &self.wishlist
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }
}
