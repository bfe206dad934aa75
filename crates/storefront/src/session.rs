//! A single shopper's session.
//!
//! Each session owns its own [`Store`] and [`Checkout`]; nothing is shared
//! between sessions except the read-only [`AppState`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use maison_core::ProductId;

use crate::catalog::{FilterSpec, Product};
use crate::checkout::{Checkout, OrderConfirmation, OrderSummary, PaymentForm, ShippingForm};
use crate::error::Result;
use crate::selection::{self, ProductSelection};
use crate::state::AppState;
use crate::store::Store;

/// Cart, wishlist and checkout progress for one shopper.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    app: AppState,
    store: Store,
    checkout: Checkout,
}

impl Session {
    pub(crate) fn new(app: AppState) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            app,
            store: Store::new(),
            checkout: Checkout::new(),
        };
        tracing::info!(session_id = %session.id, "Session started");
        session
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn app(&self) -> &AppState {
        &self.app
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Filter state with nothing selected and the configured price ceiling.
    #[must_use]
    pub fn default_filter(&self) -> FilterSpec {
        FilterSpec::new(self.app.config().catalog.price_ceiling)
    }

    /// Run the catalog pipeline.
    #[must_use]
    pub fn browse(&self, spec: &FilterSpec) -> Vec<Arc<Product>> {
        self.app.catalog().filter(spec)
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist.
    pub fn product(&self, id: &ProductId) -> Result<Arc<Product>> {
        Ok(Arc::clone(self.app.catalog().require(id)?))
    }

    /// Products shown under "You may also like".
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<Arc<Product>> {
        self.app
            .catalog()
            .related(product, self.app.config().catalog.related_limit)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product page selection to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if no size was selected.
    pub fn add_selection(&mut self, selection: &ProductSelection) -> Result<()> {
        selection.add_to(&mut self.store)?;
        Ok(())
    }

    /// Add one unit of the product's first size and color.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist.
    pub fn quick_add(&mut self, id: &ProductId) -> Result<()> {
        let product = self.product(id)?;
        selection::quick_add(&mut self.store, &product);
        Ok(())
    }

    /// Toggle a product in the wishlist. Returns true if it is now saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self.product(id)?;
        Ok(self.store.toggle_wishlist(&product))
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::for_store(&self.store, &self.app.config().pricing)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submit the shipping step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is out of order or the form is invalid.
    pub fn submit_shipping(&mut self, form: &ShippingForm) -> Result<()> {
        self.checkout.submit_shipping(form)?;
        Ok(())
    }

    /// Go back from payment to shipping.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout is not at the payment step.
    pub fn back_to_shipping(&mut self) -> Result<()> {
        self.checkout.back_to_shipping()?;
        Ok(())
    }

    /// Submit payment and place the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is out of order, the cart is empty or the
    /// form is invalid.
    #[instrument(skip_all, fields(session_id = %self.id))]
    pub fn submit_payment(&mut self, form: &PaymentForm) -> Result<&OrderConfirmation> {
        let confirmation = self.checkout.submit_payment(
            form,
            &self.store,
            &self.app.config().pricing,
            &mut rand::rng(),
        )?;
        Ok(confirmation)
    }

    /// Start a new checkout, discarding any progress.
    pub fn restart_checkout(&mut self) {
        self.checkout = Checkout::new();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::info!(
            session_id = %self.id,
            cart_items = self.store.cart_count(),
            wishlist_items = self.store.wishlist_count(),
            "Session ended"
        );
    }
}
