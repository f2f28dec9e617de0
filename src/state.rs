use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    gateway::OrderGateway,
    pricing::PricingConfig,
    session::{Session, SessionStore},
};

/// Shared application state: the session registry, the pricing knobs, and the
/// order backend behind its gateway trait. Everything checkout needs arrives
/// through here rather than ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub pricing: PricingConfig,
    pub gateway: Arc<dyn OrderGateway>,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionStore>,
        pricing: PricingConfig,
        gateway: Arc<dyn OrderGateway>,
    ) -> Self {
        Self {
            sessions,
            pricing,
            gateway,
        }
    }

    /// Looks up a session by id, as handed in by the session header.
    pub async fn session(&self, id: Uuid) -> AppResult<Arc<Mutex<Session>>> {
        self.sessions.get(id).await.ok_or(AppError::SessionNotFound)
    }
}
