use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{AddItemRequest, CartView, SetQuantityRequest},
    error::AppResult,
    middleware::session::CartSession,
    pricing::PriceSummary,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/items", post(add_item))
        .route("/items/{id}", patch(set_quantity).delete(remove_item))
        .route("/summary", get(cart_summary))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart contents with derived totals", body = ApiResponse<CartView>),
        (status = 404, description = "Session not found"),
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::view_cart(&state, &session).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added, quantities merged on an existing id", body = ApiResponse<CartView>),
        (status = 400, description = "Invalid quantity or price"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::add_item(&state, &session, payload).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Line item id")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced; zero removes the item", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    session: CartSession,
    Path(id): Path<String>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::set_quantity(&state, &session, &id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Line item id")
    ),
    responses(
        (status = 200, description = "Item removed; absent ids are a no-op", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    session: CartSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::remove_item(&state, &session, &id).await?,
    ))
}

#[utoipa::path(delete, path = "/api/cart", tag = "Cart")]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::clear_cart(&state, &session).await?))
}

#[utoipa::path(
    get,
    path = "/api/cart/summary",
    responses(
        (status = 200, description = "Shipping, tax and total for the cart", body = ApiResponse<PriceSummary>),
    ),
    tag = "Cart"
)]
pub async fn cart_summary(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<PriceSummary>>> {
    Ok(Json(cart_service::cart_summary(&state, &session).await?))
}
