use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    cart::LineItem,
    checkout::{Address, PaymentToken},
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("order backend request failed")]
    Transport(#[from] reqwest::Error),

    #[error("payment declined: {0}")]
    Declined(String),

    #[error("order backend returned {0}")]
    UnexpectedStatus(StatusCode),
}

/// A cart line as the order backend expects it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl From<&LineItem> for OrderLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            metadata: item.metadata.clone(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub items: Vec<OrderLineItem>,
    pub shipping: Address,
    pub payment: PaymentToken,
    pub total: Decimal,
}

/// Order record returned by the backend once an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<OrderLineItem>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping_address: Address,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /orders/create-payment-intent`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount: Decimal,
}

/// The `clientSecret` is consumed by the payment provider's client library;
/// this service only passes it through.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct DeclineBody {
    message: String,
}

/// The order backend as checkout sees it: order submission and payment-intent
/// creation, nothing else.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit_order(&self, request: SubmitOrderRequest) -> Result<OrderRecord, GatewayError>;

    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError>;
}

/// reqwest-backed gateway. Requests carry a hard timeout; there are no
/// retries here, any retry policy belongs to the caller's UI layer.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit_order(&self, request: SubmitOrderRequest) -> Result<OrderRecord, GatewayError> {
        let url = format!("{}/orders", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::PAYMENT_REQUIRED => {
                let message = response
                    .json::<DeclineBody>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| "payment was declined".to_string());
                Err(GatewayError::Declined(message))
            }
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError> {
        let url = format!("{}/orders/create-payment-intent", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus(status));
        }
        Ok(response.json().await?)
    }
}
