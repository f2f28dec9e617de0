use axum::extract::FromRequestParts;
use uuid::Uuid;

use crate::error::AppError;

/// Header the storefront sends the session id in.
pub const SESSION_HEADER: &str = "x-cart-session";

/// Extracts the caller's cart session id from the `x-cart-session` header.
///
/// This only parses the id; whether the session actually exists is checked at
/// the service layer, where a miss becomes a 404.
#[derive(Debug, Clone, Copy)]
pub struct CartSession {
    pub session_id: Uuid,
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {SESSION_HEADER} header")))?;

        let value = header
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("Invalid {SESSION_HEADER} header")))?;

        let session_id = Uuid::parse_str(value.trim())
            .map_err(|_| AppError::BadRequest("Invalid session id".to_string()))?;

        Ok(CartSession { session_id })
    }
}
