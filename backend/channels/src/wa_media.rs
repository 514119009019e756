//! WhatsApp Media Upload
//!
//! Builds the multipart form the bridge expects for file messages.

use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

use tubewire_core::BotError;
use tubewire_media::detect_mime_type;

/// Read a local file and wrap it, with recipient and caption, in a multipart form.
pub async fn build_file_form(
    recipient: &str,
    path: &Path,
    filename: &str,
    caption: &str,
) -> Result<Form, BotError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| BotError::Delivery(format!("cannot read {}: {e}", path.display())))?;
    let mime = detect_mime_type(path);
    debug!(path = %path.display(), size = bytes.len(), mime, "Uploading media to WhatsApp bridge");

    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(mime)
        .map_err(|e| BotError::Delivery(e.to_string()))?;

    Ok(Form::new()
        .text("to", recipient.to_string())
        .text("filename", filename.to_string())
        .text("caption", caption.to_string())
        .part("file", part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_delivery_error() {
        let dir = TempDir::new().unwrap();
        let err = build_file_form("a@c.us", &dir.path().join("gone.mp4"), "video.mp4", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Delivery(_)));
    }

    #[tokio::test]
    async fn builds_form_for_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"fake-mp4").unwrap();
        let form = build_file_form("a@c.us", &path, "video.mp4", "caption").await;
        assert!(form.is_ok());
    }
}
