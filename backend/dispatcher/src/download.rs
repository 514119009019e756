//! Download handler: resolve a shared YouTube link and relay the video back.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use tubewire_core::{
    BotError, InboundMessage, MediaSource, MessagingProvider, QualityHint, VideoMetadata,
};
use tubewire_logging::{redact_jid, BotActivity, BotEventLogger};
use tubewire_media::{extract_youtube_url, format_duration, remove_staged, temp_media_path};

pub const ACK_TEXT: &str = "⏳ Processing YouTube link...";
pub const METADATA_FAILED_TEXT: &str = "❌ Error downloading video";
pub const DOWNLOAD_FAILED_TEXT: &str = "❌ Download failed";
const SENT_FILENAME: &str = "video.mp4";

fn video_found_text(meta: &VideoMetadata) -> String {
    format!(
        "📺 *Video Found:*\n{}\n⏱️ Duration: {}\n\n⬇️ Downloading lowest quality...",
        meta.title,
        format_duration(meta.duration_secs)
    )
}

pub struct DownloadHandler {
    provider: Arc<dyn MessagingProvider>,
    source: Arc<dyn MediaSource>,
    temp_dir: PathBuf,
    quality: QualityHint,
}

impl DownloadHandler {
    pub fn new(
        provider: Arc<dyn MessagingProvider>,
        source: Arc<dyn MediaSource>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            source,
            temp_dir: temp_dir.into(),
            quality: QualityHint::Lowest,
        }
    }

    pub fn with_quality(mut self, quality: QualityHint) -> Self {
        self.quality = quality;
        self
    }

    /// Handle one message that mentions a YouTube link.
    ///
    /// Never returns an error: every failure is reported to the chat with a
    /// generic text and logged with its detail.
    pub async fn handle_download(&self, msg: &InboundMessage) {
        let chat = msg.from.as_str();
        self.reply(chat, ACK_TEXT).await;

        let url = extract_youtube_url(&msg.body).unwrap_or_else(|| msg.body.trim().to_string());
        BotEventLogger::log(chat, BotActivity::DownloadStarted { url: url.clone() });

        let meta = match self.lookup(&url).await {
            Ok(meta) => meta,
            Err(e) => {
                error!(chat = %redact_jid(chat), error = %e, "Video lookup failed");
                BotEventLogger::log(
                    chat,
                    BotActivity::DownloadFailed {
                        stage: "metadata".into(),
                        error_msg: e.to_string(),
                    },
                );
                self.reply(chat, METADATA_FAILED_TEXT).await;
                return;
            }
        };

        self.reply(chat, &video_found_text(&meta)).await;

        let path = temp_media_path(&self.temp_dir);
        let bytes = match self.fetch_to(&url, &path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(
                    chat = %redact_jid(chat),
                    path = %path.display(),
                    error = %e,
                    "Video download failed"
                );
                BotEventLogger::log(
                    chat,
                    BotActivity::DownloadFailed {
                        stage: "stream".into(),
                        error_msg: e.to_string(),
                    },
                );
                self.reply(chat, DOWNLOAD_FAILED_TEXT).await;
                return;
            }
        };

        info!(title = %meta.title, bytes, path = %path.display(), "Video downloaded");
        self.deliver(chat, &path, &meta).await;
        BotEventLogger::log(
            chat,
            BotActivity::DownloadCompleted {
                title: meta.title,
                bytes,
            },
        );
    }

    async fn lookup(&self, url: &str) -> Result<VideoMetadata, BotError> {
        if !self.source.validate_url(url) {
            return Err(BotError::UnsupportedUrl(url.to_string()));
        }
        self.source.resolve(url).await
    }

    async fn fetch_to(&self, url: &str, path: &Path) -> Result<u64, BotError> {
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| BotError::Stream(format!("cannot create {}: {e}", path.display())))?;
        let stream = self.source.open_stream(url, self.quality).await?;
        stream.pipe_to(&mut file).await
    }

    async fn deliver(&self, chat: &str, path: &Path, meta: &VideoMetadata) {
        let caption = format!("✅ {}", meta.title);
        if let Err(e) = self
            .provider
            .send_file(chat, path, SENT_FILENAME, &caption)
            .await
        {
            error!(chat = %redact_jid(chat), error = %e, "Failed to send video");
            return;
        }
        if let Err(e) = remove_staged(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove staged video");
        }
    }

    async fn reply(&self, chat: &str, text: &str) {
        if let Err(e) = self.provider.send_text(chat, text).await {
            warn!(chat = %redact_jid(chat), error = %e, "Failed to send reply");
        }
    }
}
