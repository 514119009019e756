//! MIME type detection for staged media files.
//!
//! The bridge needs a content type with every file upload.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Video
        "mp4"          => "video/mp4",
        "webm"         => "video/webm",
        "mkv"          => "video/x-matroska",
        "mov"          => "video/quicktime",
        "3gp"          => "video/3gpp",

        // Audio
        "m4a"          => "audio/mp4",
        "mp3"          => "audio/mpeg",
        "ogg" | "opus" => "audio/ogg",

        // Images (thumbnails)
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "webp"         => "image/webp",

        _              => "application/octet-stream",
    }
}
