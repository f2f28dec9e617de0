use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::LineItem,
    checkout::{Address, CheckoutStep},
    dto::{
        cart::{AddItemRequest, CartView, SetQuantityRequest},
        checkout::{CheckoutView, PaymentRequest},
    },
    gateway::{OrderLineItem, OrderRecord, PaymentIntentResponse},
    pricing::PriceSummary,
    response::{ApiResponse, Meta},
    routes::{cart, checkout, health, sessions},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        sessions::create_session,
        sessions::end_session,
        cart::view_cart,
        cart::add_item,
        cart::set_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::cart_summary,
        checkout::view_checkout,
        checkout::submit_address,
        checkout::create_payment_intent,
        checkout::submit_payment,
        checkout::confirm_order,
        checkout::step_back
    ),
    components(
        schemas(
            LineItem,
            Address,
            CheckoutStep,
            AddItemRequest,
            SetQuantityRequest,
            CartView,
            PaymentRequest,
            CheckoutView,
            OrderLineItem,
            OrderRecord,
            PaymentIntentResponse,
            PriceSummary,
            sessions::SessionCreated,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<CheckoutView>,
            ApiResponse<OrderRecord>,
            ApiResponse<PriceSummary>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Sessions", description = "Cart session lifecycle"),
        (name = "Cart", description = "Cart commands and derived totals"),
        (name = "Checkout", description = "Checkout flow and order placement"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
