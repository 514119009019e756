use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::mpsc;

use crate::error::BotError;
use crate::event::BotEvent;
use crate::stream::MediaStream;
use crate::types::{QualityHint, VideoMetadata};

/// Trait for long-running bot components that consume the event channel.
///
/// Each component runs in its own Tokio task.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Human-readable name of this component.
    fn name(&self) -> &str;

    /// Start the component's event loop, consuming from the given receiver.
    async fn start(&self, rx: mpsc::Receiver<BotEvent>) -> Result<()>;
}

/// A chat session provider (WhatsApp Web through a bridge, or a test double).
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Provider name (e.g., "whatsapp-bridge").
    fn name(&self) -> &str;

    /// Establish the session and keep forwarding state changes and inbound
    /// messages into `events` until the receiver is dropped.
    async fn start_session(&self, events: mpsc::Sender<BotEvent>) -> Result<(), BotError>;

    /// Fetch the pairing code issued for the current handshake.
    async fn pairing_code(&self) -> Result<String, BotError>;

    /// Send a plain text message.
    async fn send_text(&self, recipient: &str, text: &str) -> Result<(), BotError>;

    /// Send a local file as an attachment.
    async fn send_file(
        &self,
        recipient: &str,
        path: &Path,
        filename: &str,
        caption: &str,
    ) -> Result<(), BotError>;
}

/// A video metadata and stream provider (yt-dlp, or a test double).
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Source name (e.g., "yt-dlp").
    fn name(&self) -> &str;

    /// Cheap syntactic check whether this source can handle `url`.
    fn validate_url(&self, url: &str) -> bool;

    /// Resolve title and duration without downloading.
    async fn resolve(&self, url: &str) -> Result<VideoMetadata, BotError>;

    /// Open a combined audio+video stream at the requested quality.
    async fn open_stream(&self, url: &str, quality: QualityHint) -> Result<MediaStream, BotError>;
}
