use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    checkout::Address,
    dto::checkout::{CheckoutView, PaymentRequest},
    error::AppResult,
    gateway::{OrderRecord, PaymentIntentResponse},
    middleware::session::CartSession,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_checkout))
        .route("/address", post(submit_address))
        .route("/payment-intent", post(create_payment_intent))
        .route("/payment", post(submit_payment))
        .route("/confirm", post(confirm_order))
        .route("/back", post(step_back))
}

#[utoipa::path(get, path = "/api/checkout", tag = "Checkout")]
pub async fn view_checkout(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    Ok(Json(
        checkout_service::view_checkout(&state, &session).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/checkout/address",
    request_body = Address,
    responses(
        (status = 200, description = "Address saved, flow moves to payment", body = ApiResponse<CheckoutView>),
        (status = 400, description = "Cart is empty"),
        (status = 409, description = "Not at the address step"),
    ),
    tag = "Checkout"
)]
pub async fn submit_address(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<Address>,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    Ok(Json(
        checkout_service::submit_address(&state, &session, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/checkout/payment-intent",
    responses(
        (status = 200, description = "Payment intent for the cart total", body = ApiResponse<PaymentIntentResponse>),
        (status = 409, description = "Not at the payment step"),
        (status = 502, description = "Order backend unavailable"),
    ),
    tag = "Checkout"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<PaymentIntentResponse>>> {
    Ok(Json(
        checkout_service::create_payment_intent(&state, &session).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/checkout/payment",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment attached, flow moves to review", body = ApiResponse<CheckoutView>),
        (status = 409, description = "Not at the payment step"),
    ),
    tag = "Checkout"
)]
pub async fn submit_payment(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    Ok(Json(
        checkout_service::submit_payment(&state, &session, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/checkout/confirm",
    responses(
        (status = 200, description = "Order placed; cart emptied", body = ApiResponse<OrderRecord>),
        (status = 402, description = "Payment declined, flow stays at review"),
        (status = 409, description = "Not at review, or a confirm is already in flight"),
        (status = 502, description = "Order backend unavailable"),
    ),
    tag = "Checkout"
)]
pub async fn confirm_order(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<OrderRecord>>> {
    Ok(Json(
        checkout_service::confirm_order(&state, &session).await?,
    ))
}

#[utoipa::path(post, path = "/api/checkout/back", tag = "Checkout")]
pub async fn step_back(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CheckoutView>>> {
    Ok(Json(checkout_service::step_back(&state, &session).await?))
}
