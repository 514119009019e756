//! Process-wide bot state, owned explicitly and shared behind an `Arc`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Returned by `/pair-code` until the provider issues a code.
pub const PAIR_CODE_PLACEHOLDER: &str = "Generating...";

/// Reference to the single messaging session this process runs.
#[derive(Debug, Clone, Serialize)]
pub struct SessionHandle {
    pub id: Uuid,
    pub session_name: String,
    pub started_at: DateTime<Utc>,
}

impl SessionHandle {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_name: session_name.into(),
            started_at: Utc::now(),
        }
    }
}

/// Shared state read by the HTTP routes and written by the launcher and dispatcher.
#[derive(Debug, Default)]
pub struct BotContext {
    session: RwLock<Option<SessionHandle>>,
    pair_code: RwLock<Option<String>>,
}

impl BotContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new session handle unless one already exists.
    ///
    /// Returns `None` when a session is already present. Check and set happen
    /// under one write lock, so concurrent callers cannot both succeed.
    pub async fn try_begin_session(&self, session_name: &str) -> Option<SessionHandle> {
        let mut guard = self.session.write().await;
        if guard.is_some() {
            debug!("Session already present; not starting another");
            return None;
        }
        let handle = SessionHandle::new(session_name);
        info!(session_id = %handle.id, session = %handle.session_name, "Session handle created");
        *guard = Some(handle.clone());
        Some(handle)
    }

    /// Drop the handle with the given id (used when a start attempt fails).
    pub async fn clear_session(&self, id: Uuid) {
        let mut guard = self.session.write().await;
        if guard.as_ref().map(|h| h.id) == Some(id) {
            *guard = None;
            info!(session_id = %id, "Session handle cleared");
        }
    }

    pub async fn session(&self) -> Option<SessionHandle> {
        self.session.read().await.clone()
    }

    /// Whether a start was attempted and has not failed. This does not track
    /// live connectivity.
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub async fn set_pair_code(&self, code: impl Into<String>) {
        *self.pair_code.write().await = Some(code.into());
    }

    pub async fn pair_code(&self) -> Option<String> {
        self.pair_code.read().await.clone()
    }

    /// Current pairing code, or [`PAIR_CODE_PLACEHOLDER`] if none was issued.
    pub async fn pair_code_or_placeholder(&self) -> String {
        self.pair_code()
            .await
            .unwrap_or_else(|| PAIR_CODE_PLACEHOLDER.to_string())
    }
}
