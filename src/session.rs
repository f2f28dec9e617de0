use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{cart::Cart, checkout::Checkout, gateway::OrderRecord};

/// Everything the storefront holds for one browsing session: the cart, the
/// current checkout flow, and the last confirmed order.
///
/// `confirm_in_flight` mirrors the storefront's disabled-while-processing
/// behavior: while an order submission is outstanding, a second confirm for
/// the same session is rejected instead of queued.
#[derive(Debug)]
pub struct Session {
    pub cart: Cart,
    pub checkout: Checkout,
    pub last_order: Option<OrderRecord>,
    pub confirm_in_flight: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            cart: Cart::new(),
            checkout: Checkout::new(),
            last_order: None,
            confirm_in_flight: false,
            created_at: Utc::now(),
        }
    }
}

/// Process-local registry of sessions. Carts are UI state and are never
/// persisted server-side; dropping the process drops them.
///
/// Each session sits behind its own lock, so commands against one cart run
/// one at a time while separate sessions stay independent.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops a session and everything in it. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
