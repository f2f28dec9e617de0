use crate::{
    cart::NewLineItem,
    dto::cart::{AddItemRequest, CartView, SetQuantityRequest},
    error::AppResult,
    middleware::session::CartSession,
    pricing::{self, PriceSummary},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn view_cart(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<CartView>> {
    let sess = state.session(session.session_id).await?;
    let sess = sess.lock().await;

    let meta = Meta::items(sess.cart.items().len() as u64);
    Ok(ApiResponse::success(
        "OK",
        CartView::from_cart(&sess.cart),
        Some(meta),
    ))
}

pub async fn add_item(
    state: &AppState,
    session: &CartSession,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    let item_id = payload.id.clone();
    sess.cart.add(
        NewLineItem {
            id: payload.id,
            name: payload.name,
            unit_price: payload.unit_price,
            metadata: payload.metadata,
        },
        payload.quantity,
    )?;

    tracing::debug!(
        session_id = %session.session_id,
        item_id = %item_id,
        quantity = payload.quantity,
        "item added to cart"
    );

    Ok(ApiResponse::success(
        "Added to cart",
        CartView::from_cart(&sess.cart),
        None,
    ))
}

pub async fn set_quantity(
    state: &AppState,
    session: &CartSession,
    item_id: &str,
    payload: SetQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    sess.cart.set_quantity(item_id, payload.quantity)?;

    tracing::debug!(
        session_id = %session.session_id,
        item_id = %item_id,
        quantity = payload.quantity,
        "cart quantity updated"
    );

    Ok(ApiResponse::success(
        "Quantity updated",
        CartView::from_cart(&sess.cart),
        None,
    ))
}

pub async fn remove_item(
    state: &AppState,
    session: &CartSession,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    // removing an absent id is a no-op, not an error
    sess.cart.remove(item_id);

    tracing::debug!(
        session_id = %session.session_id,
        item_id = %item_id,
        "item removed from cart"
    );

    Ok(ApiResponse::success(
        "Removed from cart",
        CartView::from_cart(&sess.cart),
        None,
    ))
}

pub async fn clear_cart(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<CartView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    sess.cart.clear();

    tracing::debug!(session_id = %session.session_id, "cart cleared");

    Ok(ApiResponse::success(
        "Cart cleared",
        CartView::from_cart(&sess.cart),
        None,
    ))
}

pub async fn cart_summary(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<PriceSummary>> {
    let sess = state.session(session.session_id).await?;
    let sess = sess.lock().await;

    let summary = pricing::price_summary(&sess.cart, &state.pricing);
    Ok(ApiResponse::success("OK", summary, Some(Meta::empty())))
}
