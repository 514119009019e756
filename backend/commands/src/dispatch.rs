//! Command dispatch: route detected commands to handlers.
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::registry::HELP_TEXT;
use crate::types::CommandInvocation;

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub sender: String,
}

/// Text reply to send back to the invoking chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub text: String,
}

impl CommandResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

/// Replies with the static help text.
pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        Ok(CommandResponse::ok(HELP_TEXT))
    }
}

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    /// Run the handler for `inv`. Commands without a handler produce no reply.
    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        inv: &CommandInvocation,
    ) -> Result<Option<CommandResponse>> {
        match self.handlers.get(&inv.key) {
            Some(handler) => {
                info!(command = %inv.key, "Dispatching chat command");
                handler.handle(ctx, inv).await.map(Some)
            }
            None => {
                debug!(command = %inv.key, "No handler registered");
                Ok(None)
            }
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
