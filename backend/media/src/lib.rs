//! Video download support: link detection, yt-dlp backed [`MediaSource`],
//! duration formatting, and temp-file staging.
//!
//! [`MediaSource`]: tubewire_core::MediaSource

pub mod duration;
pub mod link;
pub mod mime_detect;
pub mod staging;
pub mod ytdlp;

pub use duration::format_duration;
pub use link::{contains_youtube_link, extract_youtube_url, is_youtube_url};
pub use mime_detect::detect_mime_type;
pub use staging::{remove_staged, temp_media_path};
pub use ytdlp::YtDlpSource;
