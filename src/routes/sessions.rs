use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::session::CartSession,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_session).delete(end_session))
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 200, description = "New empty cart session", body = ApiResponse<SessionCreated>),
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SessionCreated>>> {
    let session_id = state.sessions.create().await;

    tracing::debug!(session_id = %session_id, "session created");

    Ok(Json(ApiResponse::success(
        "Session created",
        SessionCreated { session_id },
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/sessions",
    responses(
        (status = 200, description = "Session dropped", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Session not found"),
    ),
    tag = "Sessions"
)]
pub async fn end_session(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !state.sessions.remove(session.session_id).await {
        return Err(AppError::SessionNotFound);
    }

    tracing::debug!(session_id = %session.session_id, "session dropped");

    Ok(Json(ApiResponse::success(
        "Session ended",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
