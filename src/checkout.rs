use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("not allowed at checkout step {0}")]
    WrongStep(CheckoutStep),
}

/// Steps of the checkout flow, in order. Forward progression only, with a
/// single back transition; `Confirmed` is terminal for a given flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Address,
    Payment,
    Review,
    Confirmed,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Address => "address",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// Shipping address collected at the first checkout step. Field names follow
/// the order backend's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub email: String,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Opaque token handed back by the payment provider's client library.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentToken(pub String);

/// The checkout state machine: `Address -> Payment -> Review -> Confirmed`,
/// no skipping, one step back at a time.
///
/// The machine itself never talks to the backend; confirming an order is the
/// caller's job, and `confirmed` is only invoked after the backend accepted
/// the submission. A failed submission leaves the machine where it was.
#[derive(Debug, Clone)]
pub struct Checkout {
    step: CheckoutStep,
    address: Option<Address>,
    payment: Option<PaymentToken>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Address,
            address: None,
            payment: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn payment(&self) -> Option<&PaymentToken> {
        self.payment.as_ref()
    }

    /// Records the shipping address and advances to the payment step.
    pub fn submit_address(&mut self, address: Address) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Address {
            return Err(CheckoutError::WrongStep(self.step));
        }
        self.address = Some(address);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Attaches the payment token and advances to the review step.
    pub fn submit_payment(&mut self, token: PaymentToken) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(self.step));
        }
        self.payment = Some(token);
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// Checks the flow is at review with everything collected, handing back
    /// what order submission needs.
    pub fn ready_to_confirm(&self) -> Result<(&Address, &PaymentToken), CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::WrongStep(self.step));
        }
        match (self.address.as_ref(), self.payment.as_ref()) {
            (Some(address), Some(payment)) => Ok((address, payment)),
            _ => Err(CheckoutError::WrongStep(self.step)),
        }
    }

    /// Marks the flow confirmed. Valid only at review, after the backend
    /// accepted the order.
    pub fn confirmed(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::WrongStep(self.step));
        }
        self.step = CheckoutStep::Confirmed;
        Ok(())
    }

    /// Steps back to the previous screen. Collected address and payment are
    /// kept so moving forward again does not re-enter them.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Address | CheckoutStep::Confirmed => {
                return Err(CheckoutError::WrongStep(self.step));
            }
        };
        Ok(())
    }
}
