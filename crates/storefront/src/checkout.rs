//! Checkout: order totals and the shipping → payment → success steps.
//!
//! The checkout only reads the cart. Confirming an order generates a local
//! order number; nothing is sent anywhere and the cart is left as it was.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use maison_core::{Email, EmailError, OrderNumber, Price};

use crate::config::PricingConfig;
use crate::store::Store;

/// Country preselected on the shipping form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Errors raised by checkout steps.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot {action} during the {step} step")]
    InvalidStep {
        action: &'static str,
        step: CheckoutStep,
    },
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("Could not generate an order number: {0}")]
    OrderNumber(String),
}

// =============================================================================
// Order Summary
// =============================================================================

/// Subtotal, shipping, tax and total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(skip)]
    free_shipping_threshold: Decimal,
    #[serde(skip)]
    currency: maison_core::CurrencyCode,
}

impl OrderSummary {
    /// Price a subtotal.
    ///
    /// Shipping is free only when the subtotal is strictly greater than the
    /// threshold; tax is charged on the subtotal alone.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, pricing: &PricingConfig) -> Self {
        let shipping = if subtotal > pricing.free_shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.flat_shipping_fee
        };
        let tax = subtotal * pricing.tax_rate;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            free_shipping_threshold: pricing.free_shipping_threshold,
            currency: pricing.currency,
        }
    }

    /// Price the current cart.
    #[must_use]
    pub fn for_store(store: &Store, pricing: &PricingConfig) -> Self {
        Self::from_subtotal(store.cart_total(), pricing)
    }

    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more must be spent to reach the free-shipping threshold.
    #[must_use]
    pub fn amount_to_free_shipping(&self) -> Option<Decimal> {
        if self.is_free_shipping() {
            return None;
        }
        Some((self.free_shipping_threshold - self.subtotal).max(Decimal::ZERO))
    }

    /// Attach the store currency to an amount for display.
    #[must_use]
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency)
    }

    /// "Free" or the formatted shipping fee.
    #[must_use]
    pub fn shipping_label(&self) -> String {
        if self.is_free_shipping() {
            "Free".to_string()
        } else {
            self.price(self.shipping).display()
        }
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subtotal  {}", self.price(self.subtotal))?;
        writeln!(f, "Shipping  {}", self.shipping_label())?;
        writeln!(f, "Tax       {}", self.price(self.tax))?;
        write!(f, "Total     {}", self.price(self.total))
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Shipping form as entered by the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingForm {
    /// Check every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for the first blank field, or
    /// `CheckoutError::InvalidEmail`.
    pub fn validate(&self) -> Result<ShippingDetails, CheckoutError> {
        Ok(ShippingDetails {
            email: Email::parse(required(&self.email, "Email")?)?,
            first_name: required(&self.first_name, "First name")?.to_owned(),
            last_name: required(&self.last_name, "Last name")?.to_owned(),
            address: required(&self.address, "Address")?.to_owned(),
            city: required(&self.city, "City")?.to_owned(),
            state: required(&self.state, "State")?.to_owned(),
            zip_code: required(&self.zip_code, "ZIP code")?.to_owned(),
            country: required(&self.country, "Country")?.to_owned(),
        })
    }
}

/// Payment form. Card number and CVV never appear in `Debug` output.
pub struct PaymentForm {
    pub card_number: SecretString,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: SecretString,
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_number", &"[REDACTED]")
            .field("card_name", &self.card_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl PaymentForm {
    fn validate(&self) -> Result<(), CheckoutError> {
        required(self.card_number.expose_secret(), "Card number")?;
        required(&self.card_name, "Name on card")?;
        required(&self.expiry_date, "Expiry date")?;
        required(self.cvv.expose_secret(), "CVV")?;
        Ok(())
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed)
}

// =============================================================================
// Step Machine
// =============================================================================

/// Where the shopper is in the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Success,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => write!(f, "shipping"),
            Self::Payment => write!(f, "payment"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub email: Email,
    pub summary: OrderSummary,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

/// Checkout progress for one session.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    step: CheckoutStep,
    shipping: Option<ShippingDetails>,
    confirmation: Option<OrderConfirmation>,
}

impl Checkout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Accept the shipping form and move to payment.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidStep` outside the shipping step, or a
    /// validation error for the form.
    #[instrument(skip_all, fields(step = %self.step))]
    pub fn submit_shipping(&mut self, form: &ShippingForm) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping, "submit shipping details")?;

        self.shipping = Some(form.validate()?);
        self.step = CheckoutStep::Payment;
        tracing::debug!("Shipping details accepted");
        Ok(())
    }

    /// Return from payment to the shipping form, keeping what was entered.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidStep` outside the payment step.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, "go back to shipping")?;
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Accept payment and place the order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidStep` outside the payment step,
    /// `CheckoutError::EmptyCart` when there is nothing to order, or a
    /// validation error for the form.
    #[instrument(skip_all, fields(step = %self.step))]
    pub fn submit_payment<R: Rng + ?Sized>(
        &mut self,
        form: &PaymentForm,
        store: &Store,
        pricing: &PricingConfig,
        rng: &mut R,
    ) -> Result<&OrderConfirmation, CheckoutError> {
        self.expect_step(CheckoutStep::Payment, "submit payment")?;
        if store.is_cart_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        form.validate()?;

        let Some(shipping) = self.shipping.as_ref() else {
            return Err(CheckoutError::InvalidStep {
                action: "submit payment",
                step: self.step,
            });
        };

        let confirmation = OrderConfirmation {
            order_number: generate_order_number(rng)?,
            email: shipping.email.clone(),
            summary: OrderSummary::for_store(store, pricing),
            item_count: store.cart_count(),
            placed_at: Utc::now(),
        };

        tracing::info!(
            order_number = %confirmation.order_number,
            total = %confirmation.summary.total,
            items = confirmation.item_count,
            "Order placed"
        );

        self.step = CheckoutStep::Success;
        Ok(&*self.confirmation.insert(confirmation))
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidStep {
                action,
                step: self.step,
            })
        }
    }
}

/// `ORD-` followed by random upper-case letters and digits.
fn generate_order_number<R: Rng + ?Sized>(rng: &mut R) -> Result<OrderNumber, CheckoutError> {
    let code: String = (0..OrderNumber::CODE_LENGTH)
        .filter_map(|_| OrderNumber::ALPHABET.choose(rng).copied().map(char::from))
        .collect();
    OrderNumber::from_code(&code).map_err(|e| CheckoutError::OrderNumber(e.to_string()))
}
