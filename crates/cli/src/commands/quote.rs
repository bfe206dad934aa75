//! Cart pricing command.

use std::fmt::Write as _;

use maison_core::Price;
use maison_storefront::{AppState, Session};

use super::{QuoteArgs, fill_cart, output};

/// Build a cart from `--item` arguments and print its order summary.
///
/// # Errors
///
/// Returns an error if an item names an unknown product, size or color.
pub fn quote(app: &AppState, args: &QuoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = app.start_session();
    fill_cart(&mut session, &args.items)?;

    output(&render_cart(&session)?)?;
    Ok(())
}

/// Cart lines followed by the order summary.
pub(super) fn render_cart(session: &Session) -> Result<String, std::fmt::Error> {
    let currency = session.app().config().pricing.currency;
    let summary = session.order_summary();

    let mut text = String::new();
    for line in session.store().cart_lines() {
        writeln!(
            text,
            "{:>3} x {:<30} {} / {:<6} {:>9}",
            line.quantity,
            line.product.name,
            line.selected_color,
            line.selected_size,
            Price::new(line.line_total(), currency).display()
        )?;
    }
    writeln!(text)?;
    writeln!(text, "{summary}")?;

    if let Some(remaining) = summary.amount_to_free_shipping() {
        writeln!(
            text,
            "Add {} more for free shipping",
            Price::new(remaining, currency)
        )?;
    }

    Ok(text.trim_end().to_string())
}
