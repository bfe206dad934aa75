//! Browsing, cart, wishlist and checkout end to end.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use maison_core::{Category, ProductId, SortMode};
use maison_integration_tests::{ids, payment_form, seed_app, shipping_form};
use maison_storefront::checkout::CheckoutStep;
use maison_storefront::{AppError, CheckoutError, ProductSelection, SelectionError};

#[test]
fn test_browse_select_and_check_out() {
    let app = seed_app();
    let mut session = app.start_session();

    // Outerwear, cheapest first.
    let spec = session
        .default_filter()
        .with_category(Category::Outerwear)
        .with_sort(SortMode::PriceAscending);
    let outerwear = session.browse(&spec);
    assert_eq!(ids(&outerwear), ["5", "1"]);

    // Product page: forgetting the size is refused.
    let blazer = session.product(&ProductId::new("1")).unwrap();
    let mut selection = ProductSelection::new(blazer);
    assert!(matches!(
        session.add_selection(&selection),
        Err(AppError::Selection(SelectionError::SizeNotSelected))
    ));

    selection.select_size("M").unwrap();
    selection.select_color("Black").unwrap();
    session.add_selection(&selection).unwrap();

    // Quick add from a product card, twice.
    session.quick_add(&ProductId::new("2")).unwrap();
    session.quick_add(&ProductId::new("2")).unwrap();

    let store = session.store();
    assert_eq!(store.cart_lines().len(), 2);
    assert_eq!(store.cart_count(), 3);
    let shirt = store
        .cart_line(&ProductId::new("2"), "XS", "Beige")
        .unwrap();
    assert_eq!(shirt.quantity, 2);

    // 189 + 2 * 89 = 367, free shipping, 10% tax.
    let summary = session.order_summary();
    assert_eq!(summary.subtotal, Decimal::from(367));
    assert!(summary.is_free_shipping());
    assert_eq!(summary.tax, Decimal::new(367, 1));
    assert_eq!(summary.total, Decimal::new(4037, 1));

    session.submit_shipping(&shipping_form()).unwrap();
    session.back_to_shipping().unwrap();
    session.submit_shipping(&shipping_form()).unwrap();

    let confirmation = session.submit_payment(&payment_form()).unwrap().clone();
    assert_eq!(confirmation.email.as_str(), "you@example.com");
    assert_eq!(confirmation.summary, summary);
    assert_eq!(confirmation.item_count, 3);
    assert!(confirmation.order_number.to_string().starts_with("#ORD-"));
    assert_eq!(session.checkout().step(), CheckoutStep::Success);

    // Placing the order leaves the cart as it was.
    assert_eq!(session.store().cart_count(), 3);
}

#[test]
fn test_cart_edits() {
    let app = seed_app();
    let mut session = app.start_session();
    let jeans = session.product(&ProductId::new("6")).unwrap();

    let store = session.store_mut();
    store.add_to_cart(&jeans, "27", "Blue", 1);
    store.add_to_cart(&jeans, "28", "Blue", 1);
    store.update_quantity(&jeans.id, "27", "Blue", 4);
    assert_eq!(store.cart_count(), 5);

    store.update_quantity(&jeans.id, "28", "Blue", 0);
    assert_eq!(store.cart_lines().len(), 1);

    store.remove_from_cart(&jeans.id, "27", "Blue");
    assert!(store.is_cart_empty());
    assert_eq!(session.order_summary().total, Decimal::from(10));
}

#[test]
fn test_wishlist_toggle() {
    let app = seed_app();
    let mut session = app.start_session();
    let bag = ProductId::new("4");

    assert!(session.toggle_wishlist(&bag).unwrap());
    assert!(session.store().is_in_wishlist(&bag));
    assert!(!session.toggle_wishlist(&bag).unwrap());
    assert_eq!(session.store().wishlist_count(), 0);
}

#[test]
fn test_threshold_is_strict() {
    let app = seed_app();
    let mut session = app.start_session();
    let shirt = session.product(&ProductId::new("2")).unwrap();

    session.store_mut().add_to_cart(&shirt, "S", "White", 1);
    let summary = session.order_summary();
    assert_eq!(summary.shipping, Decimal::from(10));
    assert_eq!(summary.amount_to_free_shipping(), Some(Decimal::from(11)));
}

#[test]
fn test_checkout_with_empty_cart() {
    let app = seed_app();
    let mut session = app.start_session();
    session.submit_shipping(&shipping_form()).unwrap();

    let err = session.submit_payment(&payment_form()).unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(session.checkout().step(), CheckoutStep::Payment);
}

#[test]
fn test_payment_before_shipping() {
    let app = seed_app();
    let mut session = app.start_session();
    session.quick_add(&ProductId::new("7")).unwrap();

    let err = session.submit_payment(&payment_form()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Checkout(CheckoutError::InvalidStep { .. })
    ));
}
