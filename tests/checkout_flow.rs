use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Notify;
use uuid::Uuid;

use storefront_cart_api::{
    cart::CartError,
    checkout::{Address, CheckoutError, CheckoutStep},
    dto::{cart::AddItemRequest, checkout::PaymentRequest},
    error::AppError,
    gateway::{
        GatewayError, MockOrderGateway, OrderGateway, OrderRecord, PaymentIntentRequest,
        PaymentIntentResponse, SubmitOrderRequest,
    },
    middleware::session::CartSession,
    pricing::PricingConfig,
    services::{cart_service, checkout_service},
    session::SessionStore,
    state::AppState,
};

fn pricing() -> PricingConfig {
    PricingConfig {
        free_shipping_threshold: Decimal::new(50, 0),
        flat_shipping_rate: Decimal::new(10, 0),
        tax_rate: Decimal::new(8, 2),
    }
}

fn test_state(gateway: impl OrderGateway + 'static) -> AppState {
    AppState::new(Arc::new(SessionStore::new()), pricing(), Arc::new(gateway))
}

async fn new_session(state: &AppState) -> CartSession {
    CartSession {
        session_id: state.sessions.create().await,
    }
}

fn add_request(id: &str, unit_price: Decimal, quantity: u32) -> AddItemRequest {
    AddItemRequest {
        id: id.to_string(),
        name: format!("Product {id}"),
        unit_price,
        quantity,
        metadata: None,
    }
}

fn sample_address() -> Address {
    Address {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        line1: "1 Analytical Way".to_string(),
        line2: None,
        city: "London".to_string(),
        postal_code: "N1 7AA".to_string(),
        country: "GB".to_string(),
    }
}

fn order_from(request: SubmitOrderRequest) -> OrderRecord {
    let now = Utc::now();
    OrderRecord {
        id: "ord_0001".to_string(),
        email: request.shipping.email.clone(),
        subtotal: request.total,
        shipping_cost: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: request.total,
        items: request.items,
        shipping_address: request.shipping,
        created_at: now,
        updated_at: now,
    }
}

// Fill the cart with the storefront example (subtotal 149.97) and walk the
// checkout to the review step.
async fn walk_to_review(state: &AppState, session: &CartSession) {
    cart_service::add_item(state, session, add_request("A", Decimal::new(2999, 2), 1))
        .await
        .unwrap();
    cart_service::add_item(state, session, add_request("B", Decimal::new(5999, 2), 2))
        .await
        .unwrap();
    checkout_service::submit_address(state, session, sample_address())
        .await
        .unwrap();
    checkout_service::submit_payment(
        state,
        session,
        PaymentRequest {
            token: "tok_visa".to_string(),
        },
    )
    .await
    .unwrap();
}

// 149.97 subtotal, free shipping past 50, 8% tax
fn expected_total() -> Decimal {
    Decimal::new(1_619_676, 4)
}

#[tokio::test]
async fn full_checkout_flow_confirms_and_clears_the_cart() {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_submit_order()
        .withf(|request| request.total == expected_total() && request.items.len() == 2)
        .returning(|request| Ok(order_from(request)));

    let state = test_state(gateway);
    let session = new_session(&state).await;
    walk_to_review(&state, &session).await;

    let response = checkout_service::confirm_order(&state, &session)
        .await
        .unwrap();
    let order = response.data.unwrap();
    assert_eq!(order.total, expected_total());
    assert_eq!(order.email, "ada@example.com");

    // order placement empties the cart
    let cart = cart_service::view_cart(&state, &session).await.unwrap();
    let cart = cart.data.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_quantity, 0);
    assert_eq!(cart.subtotal, Decimal::ZERO);

    // the completed flow is terminal; the session is ready for a fresh one
    let view = checkout_service::view_checkout(&state, &session)
        .await
        .unwrap();
    let view = view.data.unwrap();
    assert_eq!(view.step, CheckoutStep::Address);
    assert_eq!(view.last_order.unwrap().id, "ord_0001");
}

#[tokio::test]
async fn declined_payment_keeps_the_flow_at_review() {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_submit_order()
        .returning(|_| Err(GatewayError::Declined("card declined".to_string())));

    let state = test_state(gateway);
    let session = new_session(&state).await;
    walk_to_review(&state, &session).await;

    let err = checkout_service::confirm_order(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PaymentDeclined(_)));

    let view = checkout_service::view_checkout(&state, &session)
        .await
        .unwrap();
    assert_eq!(view.data.unwrap().step, CheckoutStep::Review);

    // nothing was cleared
    let cart = cart_service::view_cart(&state, &session).await.unwrap();
    assert_eq!(cart.data.unwrap().total_quantity, 3);
}

#[tokio::test]
async fn backend_failure_surfaces_as_network_error() {
    let mut gateway = MockOrderGateway::new();
    gateway.expect_submit_order().returning(|_| {
        Err(GatewayError::UnexpectedStatus(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))
    });

    let state = test_state(gateway);
    let session = new_session(&state).await;
    walk_to_review(&state, &session).await;

    let err = checkout_service::confirm_order(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));

    let view = checkout_service::view_checkout(&state, &session)
        .await
        .unwrap();
    assert_eq!(view.data.unwrap().step, CheckoutStep::Review);
}

#[tokio::test]
async fn steps_cannot_be_skipped() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;
    cart_service::add_item(&state, &session, add_request("A", Decimal::new(999, 2), 1))
        .await
        .unwrap();

    let err = checkout_service::submit_payment(
        &state,
        &session,
        PaymentRequest {
            token: "tok_visa".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Checkout(CheckoutError::WrongStep(CheckoutStep::Address))
    ));

    let err = checkout_service::confirm_order(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Checkout(CheckoutError::WrongStep(CheckoutStep::Address))
    ));
}

#[tokio::test]
async fn checkout_requires_a_non_empty_cart() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;

    let err = checkout_service::submit_address(&state, &session, sample_address())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn back_walks_exactly_one_step() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;
    cart_service::add_item(&state, &session, add_request("A", Decimal::new(999, 2), 1))
        .await
        .unwrap();
    checkout_service::submit_address(&state, &session, sample_address())
        .await
        .unwrap();

    let view = checkout_service::step_back(&state, &session).await.unwrap();
    assert_eq!(view.data.unwrap().step, CheckoutStep::Address);

    // there is nothing before the address step
    let err = checkout_service::step_back(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Checkout(CheckoutError::WrongStep(CheckoutStep::Address))
    ));
}

#[tokio::test]
async fn back_keeps_collected_address_and_payment() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;
    walk_to_review(&state, &session).await;

    checkout_service::step_back(&state, &session).await.unwrap();
    let view = checkout_service::view_checkout(&state, &session)
        .await
        .unwrap();
    let view = view.data.unwrap();
    assert_eq!(view.step, CheckoutStep::Payment);
    assert!(view.address.is_some());
    assert!(view.payment_attached);
}

#[tokio::test]
async fn payment_intent_covers_the_cart_total() {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_create_payment_intent()
        .withf(|request| request.amount == expected_total())
        .returning(|_| {
            Ok(PaymentIntentResponse {
                client_secret: "pi_secret_123".to_string(),
            })
        });

    let state = test_state(gateway);
    let session = new_session(&state).await;
    cart_service::add_item(&state, &session, add_request("A", Decimal::new(2999, 2), 1))
        .await
        .unwrap();
    cart_service::add_item(&state, &session, add_request("B", Decimal::new(5999, 2), 2))
        .await
        .unwrap();
    checkout_service::submit_address(&state, &session, sample_address())
        .await
        .unwrap();

    let intent = checkout_service::create_payment_intent(&state, &session)
        .await
        .unwrap();
    assert_eq!(intent.data.unwrap().client_secret, "pi_secret_123");
}

#[tokio::test]
async fn payment_intent_is_rejected_outside_the_payment_step() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;
    cart_service::add_item(&state, &session, add_request("A", Decimal::new(999, 2), 1))
        .await
        .unwrap();

    let err = checkout_service::create_payment_intent(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Checkout(CheckoutError::WrongStep(CheckoutStep::Address))
    ));
}

// Gateway that parks order submission until the test releases it, to observe
// the in-flight confirm guard.
struct BlockingGateway {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl OrderGateway for BlockingGateway {
    async fn submit_order(&self, request: SubmitOrderRequest) -> Result<OrderRecord, GatewayError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(order_from(request))
    }

    async fn create_payment_intent(
        &self,
        _request: PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError> {
        unreachable!("not used in this test");
    }
}

#[tokio::test]
async fn second_confirm_is_rejected_while_one_is_in_flight() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let state = test_state(BlockingGateway {
        entered: entered.clone(),
        release: release.clone(),
    });
    let session = new_session(&state).await;
    walk_to_review(&state, &session).await;

    let spawned_state = state.clone();
    let handle =
        tokio::spawn(async move { checkout_service::confirm_order(&spawned_state, &session).await });

    entered.notified().await;

    let err = checkout_service::confirm_order(&state, &session)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CheckoutInFlight));

    release.notify_one();
    let order = handle.await.unwrap().unwrap();
    assert_eq!(order.data.unwrap().total, expected_total());
}

#[tokio::test]
async fn cart_commands_surface_their_errors_through_the_service() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;

    let err = cart_service::add_item(&state, &session, add_request("A", Decimal::new(999, 2), 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::InvalidQuantity)));

    let err = cart_service::set_quantity(
        &state,
        &session,
        "missing",
        storefront_cart_api::dto::cart::SetQuantityRequest { quantity: 2 },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::ItemNotFound)));
}

#[tokio::test]
async fn unknown_session_is_a_not_found() {
    let state = test_state(MockOrderGateway::new());
    let session = CartSession {
        session_id: Uuid::new_v4(),
    };

    let err = cart_service::view_cart(&state, &session).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));
}

#[tokio::test]
async fn dropped_sessions_take_their_cart_with_them() {
    let state = test_state(MockOrderGateway::new());
    let session = new_session(&state).await;
    cart_service::add_item(&state, &session, add_request("A", Decimal::new(999, 2), 1))
        .await
        .unwrap();

    assert!(state.sessions.remove(session.session_id).await);
    assert_eq!(state.sessions.len().await, 0);

    let err = cart_service::view_cart(&state, &session).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));
}
