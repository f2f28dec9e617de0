use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::cart::Cart;

/// Injected pricing knobs. Tax policy lives with the order backend; the rate
/// here only drives the storefront's display math.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub free_shipping_threshold: Decimal,
    pub flat_shipping_rate: Decimal,
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriceSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub remaining_for_free_shipping: Decimal,
}

/// Computes the full price breakdown for a cart.
///
/// This is the single place shipping-threshold and tax math happens; views
/// format its output and never recompute it. Total function, no mutation.
pub fn price_summary(cart: &Cart, config: &PricingConfig) -> PriceSummary {
    let subtotal = cart.subtotal();

    let shipping = if subtotal >= config.free_shipping_threshold {
        Decimal::ZERO
    } else {
        config.flat_shipping_rate
    };

    let tax = subtotal * config.tax_rate;

    let remaining_for_free_shipping =
        (config.free_shipping_threshold - subtotal).max(Decimal::ZERO);

    PriceSummary {
        subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
        remaining_for_free_shipping,
    }
}
