//! yt-dlp backed [`MediaSource`].
//!
//! Metadata comes from `--dump-single-json`; the stream is yt-dlp writing the
//! selected rendition to stdout (`-o -`).

use async_trait::async_trait;
use futures::FutureExt;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use tubewire_core::{BotError, MediaSource, MediaStream, QualityHint, VideoMetadata};

use crate::link::is_youtube_url;

/// Subset of the yt-dlp info JSON this bot reads.
#[derive(Debug, Deserialize)]
struct InfoJson {
    #[serde(default)]
    id: String,
    title: Option<String>,
    duration: Option<f64>,
}

pub struct YtDlpSource {
    binary: String,
}

impl YtDlpSource {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// yt-dlp `-f` selector for a single file carrying both audio and video.
    pub fn format_selector(quality: QualityHint) -> &'static str {
        match quality {
            QualityHint::Lowest => "worst[acodec!=none][vcodec!=none]/worst",
            QualityHint::Highest => "best[acodec!=none][vcodec!=none]/best",
        }
    }

    /// Parse the info JSON printed by `--dump-single-json`.
    pub fn parse_metadata(raw: &str) -> Result<VideoMetadata, BotError> {
        let info: InfoJson = serde_json::from_str(raw)
            .map_err(|e| BotError::Metadata(format!("unparseable yt-dlp output: {e}")))?;

        let title = info
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BotError::Metadata("yt-dlp output has no title".into()))?;

        Ok(VideoMetadata {
            id: info.id,
            title,
            duration_secs: info.duration.map(|d| d.max(0.0) as u64).unwrap_or(0),
        })
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

/// Last non-empty stderr line, which is where yt-dlp puts its `ERROR:` message.
fn last_error_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("no output")
}

#[async_trait]
impl MediaSource for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn validate_url(&self, url: &str) -> bool {
        is_youtube_url(url)
    }

    async fn resolve(&self, url: &str) -> Result<VideoMetadata, BotError> {
        info!(url = %url, "Fetching video metadata");

        let output = Command::new(&self.binary)
            .args(["--dump-single-json", "--no-playlist", "--no-warnings", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| BotError::Metadata(format!("failed to run {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "yt-dlp metadata lookup failed");
            return Err(BotError::Metadata(last_error_line(&stderr).to_string()));
        }

        Self::parse_metadata(&String::from_utf8_lossy(&output.stdout))
    }

    async fn open_stream(&self, url: &str, quality: QualityHint) -> Result<MediaStream, BotError> {
        let selector = Self::format_selector(quality);
        debug!(url = %url, format = selector, "Spawning yt-dlp stream");

        let mut child = Command::new(&self.binary)
            .args(["-f", selector, "--no-playlist", "--no-part", "--quiet", "-o", "-", url])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BotError::Stream(format!("failed to run {}: {e}", self.binary)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BotError::Stream("yt-dlp stdout not captured".into()))?;

        // Drain stderr concurrently so a chatty child never blocks on a full pipe.
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut buf).await;
            }
            buf
        });

        let completion = async move {
            let status = child
                .wait()
                .await
                .map_err(|e| BotError::Stream(e.to_string()))?;
            let stderr = stderr_task.await.unwrap_or_default();
            if status.success() {
                Ok(())
            } else {
                Err(BotError::Stream(format!(
                    "yt-dlp exited with {status}: {}",
                    last_error_line(&stderr)
                )))
            }
        }
        .boxed();

        Ok(MediaStream::new(stdout).with_completion(completion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_selects_combined_worst() {
        assert_eq!(
            YtDlpSource::format_selector(QualityHint::Lowest),
            "worst[acodec!=none][vcodec!=none]/worst"
        );
    }

    #[test]
    fn parses_info_json() {
        let raw = r#"{"id":"dQw4w9WgXcQ","title":"Never Gonna Give You Up","duration":212.0,"formats":[]}"#;
        let meta = YtDlpSource::parse_metadata(raw).unwrap();
        assert_eq!(meta.id, "dQw4w9WgXcQ");
        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.duration_secs, 212);
    }

    #[test]
    fn live_streams_have_zero_duration() {
        let meta = YtDlpSource::parse_metadata(r#"{"id":"x","title":"Live"}"#).unwrap();
        assert_eq!(meta.duration_secs, 0);
    }

    #[test]
    fn missing_title_is_metadata_error() {
        let err = YtDlpSource::parse_metadata(r#"{"id":"x"}"#).unwrap_err();
        assert!(matches!(err, BotError::Metadata(_)));
    }

    #[test]
    fn garbage_is_metadata_error() {
        assert!(matches!(
            YtDlpSource::parse_metadata("ERROR: oops"),
            Err(BotError::Metadata(_))
        ));
    }

    #[test]
    fn validates_through_link_rules() {
        let source = YtDlpSource::default();
        assert!(source.validate_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!source.validate_url("https://youtube.com"));
    }

    #[test]
    fn picks_last_stderr_line() {
        assert_eq!(last_error_line("WARNING: a\nERROR: Video unavailable\n\n"), "ERROR: Video unavailable");
        assert_eq!(last_error_line(""), "no output");
    }

    #[tokio::test]
    async fn missing_binary_fails_resolve() {
        let source = YtDlpSource::new("/nonexistent/yt-dlp-binary");
        let err = source.resolve("https://youtu.be/dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, BotError::Metadata(_)));
    }

    #[tokio::test]
    async fn missing_binary_fails_stream() {
        let source = YtDlpSource::new("/nonexistent/yt-dlp-binary");
        let err = source
            .open_stream("https://youtu.be/dQw4w9WgXcQ", QualityHint::Lowest)
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Stream(_)));
    }
}
