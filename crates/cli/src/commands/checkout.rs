//! Order placement command.

use secrecy::SecretString;

use maison_storefront::AppState;
use maison_storefront::checkout::{PaymentForm, ShippingForm};

use super::{CheckoutArgs, fill_cart, output, quote::render_cart};

/// Fill a cart, run the shipping and payment steps and print the confirmation.
///
/// # Errors
///
/// Returns an error if an item is invalid, a form field is missing or the
/// email address is malformed.
pub fn checkout(app: &AppState, args: &CheckoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = app.start_session();
    fill_cart(&mut session, &args.items)?;

    session.submit_shipping(&ShippingForm {
        email: args.email.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        address: args.address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        zip_code: args.zip_code.clone(),
        country: args.country.clone(),
    })?;

    let card_name = args
        .card_name
        .clone()
        .unwrap_or_else(|| format!("{} {}", args.first_name, args.last_name));

    let cart = render_cart(&session)?;
    let confirmation = session.submit_payment(&PaymentForm {
        card_number: SecretString::from(args.card_number.clone()),
        card_name,
        expiry_date: args.expiry_date.clone(),
        cvv: SecretString::from(args.cvv.clone()),
    })?;

    output(&format!(
        "Order confirmed!\nOrder number: {}\nA confirmation email has been sent to {}\n\n{cart}",
        confirmation.order_number, confirmation.email
    ))?;
    Ok(())
}
