use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    checkout::{Address, CheckoutStep},
    gateway::OrderRecord,
    session::Session,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub address: Option<Address>,
    pub payment_attached: bool,
    pub last_order: Option<OrderRecord>,
}

impl CheckoutView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            step: session.checkout.step(),
            address: session.checkout.address().cloned(),
            payment_attached: session.checkout.payment().is_some(),
            last_order: session.last_order.clone(),
        }
    }
}
