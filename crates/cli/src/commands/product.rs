//! Product detail command.

use std::fmt::Write as _;

use maison_core::Price;
use maison_storefront::AppState;

use super::{ProductArgs, output};

/// Print a product with its reviews and related products.
///
/// # Errors
///
/// Returns an error if the product does not exist or writing fails.
pub fn show(app: &AppState, args: &ProductArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = app.start_session();
    let product = session.product(&args.id)?;
    let related = session.related(&product);

    if args.json {
        let body = serde_json::json!({
            "product": product,
            "reviews": app.catalog().reviews(),
            "related": related,
        });
        output(&serde_json::to_string_pretty(&body)?)?;
        return Ok(());
    }

    let currency = app.config().pricing.currency;
    let price = |amount| Price::new(amount, currency);

    let mut text = format!("{}\n", product.name);
    write!(text, "{}", price(product.price))?;
    if let (Some(original), Some(percent)) = (product.original_price, product.discount_percent()) {
        write!(text, "  (was {}, {percent}% off)", price(original))?;
    }
    writeln!(text)?;
    writeln!(
        text,
        "{} · {:.1} stars · {} reviews",
        product.category.label(),
        product.rating,
        product.review_count
    )?;
    writeln!(text, "Colors: {}", product.colors.join(", "))?;
    writeln!(text, "Sizes:  {}", product.sizes.join(", "))?;
    writeln!(text, "\n{}", product.description)?;

    writeln!(text, "\nReviews")?;
    for review in app.catalog().reviews() {
        let verified = if review.verified { " (verified)" } else { "" };
        writeln!(
            text,
            "  {}/5  {} on {}{verified}\n        {}",
            review.rating, review.author, review.date, review.content
        )?;
    }

    if !related.is_empty() {
        writeln!(text, "\nYou may also like")?;
        for item in &related {
            writeln!(text, "  {:>3}  {} {}", item.id, item.name, price(item.price))?;
        }
    }

    output(text.trim_end())?;
    Ok(())
}
