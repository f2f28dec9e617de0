use rust_decimal::Decimal;
use storefront_cart_api::{
    cart::{Cart, NewLineItem},
    pricing::{PricingConfig, price_summary},
};

fn config() -> PricingConfig {
    PricingConfig {
        free_shipping_threshold: Decimal::new(50, 0),
        flat_shipping_rate: Decimal::new(10, 0),
        tax_rate: Decimal::ZERO,
    }
}

fn cart_with_subtotal(amount: Decimal) -> Cart {
    let mut cart = Cart::new();
    cart.add(
        NewLineItem {
            id: "item".to_string(),
            name: "Item".to_string(),
            unit_price: amount,
            metadata: None,
        },
        1,
    )
    .unwrap();
    cart
}

#[test]
fn below_threshold_charges_flat_shipping() {
    let cart = cart_with_subtotal(Decimal::new(40, 0));
    let summary = price_summary(&cart, &config());

    assert_eq!(summary.shipping, Decimal::new(10, 0));
    assert_eq!(summary.remaining_for_free_shipping, Decimal::new(10, 0));
    assert_eq!(summary.total, Decimal::new(50, 0));
}

#[test]
fn above_threshold_ships_free() {
    let cart = cart_with_subtotal(Decimal::new(60, 0));
    let summary = price_summary(&cart, &config());

    assert_eq!(summary.shipping, Decimal::ZERO);
    assert_eq!(summary.remaining_for_free_shipping, Decimal::ZERO);
    assert_eq!(summary.total, Decimal::new(60, 0));
}

#[test]
fn exactly_at_threshold_ships_free() {
    let cart = cart_with_subtotal(Decimal::new(50, 0));
    let summary = price_summary(&cart, &config());

    assert_eq!(summary.shipping, Decimal::ZERO);
    assert_eq!(summary.remaining_for_free_shipping, Decimal::ZERO);
}

#[test]
fn tax_applies_the_injected_rate() {
    let cart = cart_with_subtotal(Decimal::new(100, 0));
    let config = PricingConfig {
        tax_rate: Decimal::new(8, 2),
        ..config()
    };
    let summary = price_summary(&cart, &config);

    assert_eq!(summary.tax, Decimal::new(8, 0));
    assert_eq!(summary.total, Decimal::new(108, 0));
}

#[test]
fn empty_cart_still_summarizes() {
    let cart = Cart::new();
    let summary = price_summary(&cart, &config());

    assert_eq!(summary.subtotal, Decimal::ZERO);
    assert_eq!(summary.shipping, Decimal::new(10, 0));
    assert_eq!(summary.remaining_for_free_shipping, Decimal::new(50, 0));
    assert_eq!(summary.total, Decimal::new(10, 0));
}

#[test]
fn summary_reads_the_cart_without_touching_it() {
    let cart = cart_with_subtotal(Decimal::new(4999, 2));
    let summary = price_summary(&cart, &config());

    assert_eq!(summary.subtotal, cart.subtotal());
    assert_eq!(cart.total_quantity(), 1);
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn fractional_amounts_stay_exact() {
    let mut cart = Cart::new();
    cart.add(
        NewLineItem {
            id: "a".to_string(),
            name: "A".to_string(),
            unit_price: Decimal::new(2999, 2),
            metadata: None,
        },
        1,
    )
    .unwrap();
    cart.add(
        NewLineItem {
            id: "b".to_string(),
            name: "B".to_string(),
            unit_price: Decimal::new(5999, 2),
            metadata: None,
        },
        2,
    )
    .unwrap();

    let config = PricingConfig {
        free_shipping_threshold: Decimal::new(50, 0),
        flat_shipping_rate: Decimal::new(10, 0),
        tax_rate: Decimal::new(8, 2),
    };
    let summary = price_summary(&cart, &config);

    assert_eq!(summary.subtotal, Decimal::new(14997, 2));
    assert_eq!(summary.shipping, Decimal::ZERO);
    assert_eq!(summary.tax, Decimal::new(119_976, 4));
    assert_eq!(summary.total, Decimal::new(1_619_676, 4));
}
