//! Catalog listing commands.

use std::fmt::Write as _;
use std::sync::Arc;

use rust_decimal::Decimal;

use maison_core::Price;
use maison_storefront::{AppState, Product};

use super::{CatalogArgs, output};

/// Print product counts per category.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn categories(app: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = String::new();
    for entry in app.catalog().category_counts() {
        writeln!(text, "{:<14}{:>3}  ({})", entry.label, entry.count, entry.filter)?;
    }
    output(text.trim_end())?;
    Ok(())
}

/// Run the filter/sort pipeline and print the result.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn list(app: &AppState, args: &CatalogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = app.start_session();
    let ceiling = app.config().catalog.price_ceiling;

    let spec = session
        .default_filter()
        .with_category(args.category)
        .with_colors(args.colors.iter().cloned())
        .with_sizes(args.sizes.iter().cloned())
        .with_price_range(
            args.min.unwrap_or(Decimal::ZERO),
            args.max.unwrap_or(ceiling),
        )
        .with_sort(args.sort);

    let products = session.browse(&spec);
    tracing::debug!(count = products.len(), "Catalog filtered");

    if args.json {
        output(&serde_json::to_string_pretty(&products)?)?;
        return Ok(());
    }

    let mut text = format!(
        "{} of {} products ({})\n",
        products.len(),
        app.catalog().len(),
        spec.sort.label()
    );
    for product in &products {
        writeln!(text, "{}", product_row(product, app))?;
    }
    output(text.trim_end())?;
    Ok(())
}

fn product_row(product: &Arc<Product>, app: &AppState) -> String {
    let currency = app.config().pricing.currency;
    let mut badges = Vec::new();
    if product.bestseller {
        badges.push("bestseller".to_string());
    }
    if let Some(percent) = product.discount_percent() {
        badges.push(format!("-{percent}%"));
    }

    format!(
        "{:>3}  {:<30} {:>9}  {:<12} {}",
        product.id,
        product.name,
        Price::new(product.price, currency).display(),
        product.category.label(),
        badges.join(" ")
    )
}
