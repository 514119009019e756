//! Starts the messaging session at most once per process.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use tubewire_core::{BotContext, BotEvent, MessagingProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

pub struct BotLauncher {
    ctx: Arc<BotContext>,
    provider: Arc<dyn MessagingProvider>,
    events_tx: mpsc::Sender<BotEvent>,
    session_name: String,
}

impl BotLauncher {
    pub fn new(
        ctx: Arc<BotContext>,
        provider: Arc<dyn MessagingProvider>,
        events_tx: mpsc::Sender<BotEvent>,
        session_name: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            provider,
            events_tx,
            session_name: session_name.into(),
        }
    }

    /// Start the session unless one is already present. Returns immediately;
    /// the start itself runs in the background.
    pub async fn start_if_idle(&self) -> StartOutcome {
        match self.launch().await {
            Some(_) => StartOutcome::Started,
            None => StartOutcome::AlreadyRunning,
        }
    }

    /// Like [`start_if_idle`](Self::start_if_idle), but hands back the start task.
    pub async fn launch(&self) -> Option<JoinHandle<()>> {
        let handle = self.ctx.try_begin_session(&self.session_name).await?;

        let ctx = self.ctx.clone();
        let provider = self.provider.clone();
        let events_tx = self.events_tx.clone();
        info!(provider = provider.name(), session = %handle.session_name, "Starting bot session");

        Some(tokio::spawn(async move {
            match provider.start_session(events_tx).await {
                Ok(()) => info!(session = %handle.session_name, "Bot session started"),
                Err(e) => {
                    error!(session = %handle.session_name, error = %e, "Failed to start bot session");
                    ctx.clear_session(handle.id).await;
                }
            }
        }))
    }
}
