use crate::{
    checkout::{Address, Checkout, CheckoutError, CheckoutStep, PaymentToken},
    dto::checkout::{CheckoutView, PaymentRequest},
    error::{AppError, AppResult},
    gateway::{
        OrderLineItem, OrderRecord, PaymentIntentRequest, PaymentIntentResponse,
        SubmitOrderRequest,
    },
    middleware::session::CartSession,
    pricing,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn view_checkout(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<CheckoutView>> {
    let sess = state.session(session.session_id).await?;
    let sess = sess.lock().await;

    Ok(ApiResponse::success(
        "OK",
        CheckoutView::from_session(&sess),
        Some(Meta::empty()),
    ))
}

pub async fn submit_address(
    state: &AppState,
    session: &CartSession,
    address: Address,
) -> AppResult<ApiResponse<CheckoutView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    if sess.cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    sess.checkout.submit_address(address)?;

    tracing::debug!(session_id = %session.session_id, "shipping address recorded");

    Ok(ApiResponse::success(
        "Address saved",
        CheckoutView::from_session(&sess),
        None,
    ))
}

/// Asks the backend for a payment intent covering the cart's current total.
/// Valid at the payment step; the returned `clientSecret` goes straight to
/// the payment provider's client library.
pub async fn create_payment_intent(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<PaymentIntentResponse>> {
    let sess_arc = state.session(session.session_id).await?;

    let amount = {
        let sess = sess_arc.lock().await;
        if sess.checkout.step() != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(sess.checkout.step()).into());
        }
        pricing::price_summary(&sess.cart, &state.pricing).total
    };

    // lock released: the backend call must not block other session commands
    let intent = state
        .gateway
        .create_payment_intent(PaymentIntentRequest { amount })
        .await?;

    Ok(ApiResponse::success("OK", intent, None))
}

pub async fn submit_payment(
    state: &AppState,
    session: &CartSession,
    payload: PaymentRequest,
) -> AppResult<ApiResponse<CheckoutView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    sess.checkout.submit_payment(PaymentToken(payload.token))?;

    tracing::debug!(session_id = %session.session_id, "payment token attached");

    Ok(ApiResponse::success(
        "Payment attached",
        CheckoutView::from_session(&sess),
        None,
    ))
}

pub async fn step_back(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<CheckoutView>> {
    let sess = state.session(session.session_id).await?;
    let mut sess = sess.lock().await;

    sess.checkout.back()?;

    Ok(ApiResponse::success(
        "OK",
        CheckoutView::from_session(&sess),
        None,
    ))
}

/// Places the order. On success the cart is emptied, the order record kept on
/// the session, and a fresh checkout flow readied; on any backend failure the
/// flow stays at review with nothing changed.
pub async fn confirm_order(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<OrderRecord>> {
    let sess_arc = state.session(session.session_id).await?;

    let request = {
        let mut sess = sess_arc.lock().await;

        if sess.confirm_in_flight {
            return Err(AppError::CheckoutInFlight);
        }

        let (address, payment) = sess.checkout.ready_to_confirm()?;
        let (address, payment) = (address.clone(), payment.clone());

        if sess.cart.is_empty() {
            return Err(AppError::BadRequest("Cart is empty".into()));
        }

        let summary = pricing::price_summary(&sess.cart, &state.pricing);
        let request = SubmitOrderRequest {
            items: sess.cart.items().iter().map(OrderLineItem::from).collect(),
            shipping: address,
            payment,
            total: summary.total,
        };

        sess.confirm_in_flight = true;
        request
    };

    // submission runs without the session lock so the guard flag, not lock
    // contention, is what rejects a second confirm
    let result = state.gateway.submit_order(request).await;

    let mut sess = sess_arc.lock().await;
    sess.confirm_in_flight = false;

    let order = match result {
        Ok(order) => order,
        Err(err) => {
            tracing::warn!(
                session_id = %session.session_id,
                error = %err,
                "order submission failed, staying at review"
            );
            return Err(err.into());
        }
    };

    if let Err(err) = sess.checkout.confirmed() {
        tracing::warn!(
            session_id = %session.session_id,
            error = %err,
            "checkout step changed while the order was in flight"
        );
    }

    sess.cart.clear();
    sess.last_order = Some(order.clone());
    // the completed flow is terminal; the session gets a fresh one
    sess.checkout = Checkout::new();

    tracing::info!(
        session_id = %session.session_id,
        order_id = %order.id,
        "order confirmed"
    );

    Ok(ApiResponse::success(
        "Order confirmed",
        order,
        Some(Meta::empty()),
    ))
}
