//! Subcommand implementations and their arguments.

use std::io::{self, Write};
use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;

use maison_core::{CategoryFilter, ProductId, SortMode};
use maison_storefront::selection::ProductSelection;
use maison_storefront::{Result as AppResult, Session};

pub mod catalog;
pub mod checkout;
pub mod product;
pub mod quote;

#[derive(Args)]
pub struct CatalogArgs {
    /// Category to show (`all`, `tops`, `bottoms`, `outerwear`, `dresses`, `accessories`)
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Only products offered in this color (repeatable)
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Only products offered in this size (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Minimum price
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Maximum price (defaults to the configured price ceiling)
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Sort order (`featured`, `newest`, `price-low`, `price-high`)
    #[arg(short, long, default_value = "featured")]
    pub sort: SortMode,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProductArgs {
    /// Product id
    pub id: ProductId,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct QuoteArgs {
    /// Cart item as `ID:SIZE:COLOR[:QTY]` (repeatable)
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemArg>,
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Cart item as `ID:SIZE:COLOR[:QTY]` (repeatable)
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemArg>,

    /// Contact email
    #[arg(short, long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub zip_code: String,

    #[arg(long, default_value = maison_storefront::checkout::DEFAULT_COUNTRY)]
    pub country: String,

    #[arg(long)]
    pub card_number: String,

    /// Name on card (defaults to first and last name)
    #[arg(long)]
    pub card_name: Option<String>,

    /// Card expiry as MM/YY
    #[arg(long)]
    pub expiry_date: String,

    #[arg(long)]
    pub cvv: String,
}

/// Error parsing an `--item` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemArgError {
    #[error("expected ID:SIZE:COLOR[:QTY], got {0:?}")]
    Format(String),
    #[error("invalid quantity {0:?}")]
    Quantity(String),
}

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = ItemArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (id, size, color, quantity) = match parts.as_slice() {
            [id, size, color] => (*id, *size, *color, 1),
            [id, size, color, qty] => {
                let quantity = qty
                    .parse::<u32>()
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or_else(|| ItemArgError::Quantity((*qty).to_owned()))?;
                (*id, *size, *color, quantity)
            }
            _ => return Err(ItemArgError::Format(s.to_owned())),
        };

        if [id, size, color].iter().any(|part| part.is_empty()) {
            return Err(ItemArgError::Format(s.to_owned()));
        }

        Ok(Self {
            product_id: ProductId::new(id),
            size: size.to_owned(),
            color: color.to_owned(),
            quantity,
        })
    }
}

/// Put every item into the session's cart, checking each variant exists.
fn fill_cart(session: &mut Session, items: &[ItemArg]) -> AppResult<()> {
    for item in items {
        let mut selection = ProductSelection::new(session.product(&item.product_id)?);
        selection.select_size(&item.size)?;
        selection.select_color(&item.color)?;
        selection.set_quantity(item.quantity);
        session.add_selection(&selection)?;
    }
    Ok(())
}

/// Write command output to stdout.
fn output(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")
}
