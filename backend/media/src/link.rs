//! YouTube link detection in free-form chat text.

use regex::Regex;
use std::sync::LazyLock;

/// Substrings that mark a message as carrying a YouTube link.
const YOUTUBE_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:(?:www|m|music)\.)?(?:youtube\.com/(?:watch\?\S*v=|shorts/|live/|embed/)[A-Za-z0-9_-]{6,}|youtu\.be/[A-Za-z0-9_-]{6,})",
    )
    .unwrap()
});

/// Whether the text mentions a YouTube host anywhere.
pub fn contains_youtube_link(text: &str) -> bool {
    YOUTUBE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Pull the first token that mentions a YouTube host out of `text`,
/// stripped of surrounding quotes and brackets.
pub fn extract_youtube_url(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|token| contains_youtube_link(token))
        .map(|token| {
            token
                .trim_matches(|c: char| matches!(c, '<' | '>' | '(' | ')' | '"' | '\'' | '*' | '_' | ','))
                .to_string()
        })
}

/// Whether `url` looks like a YouTube video URL a downloader can resolve.
pub fn is_youtube_url(url: &str) -> bool {
    YOUTUBE_URL_RE.is_match(url.trim())
}
