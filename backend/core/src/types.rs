use serde::{Deserialize, Serialize};

/// Metadata resolved for a video link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub duration_secs: u64,
}

/// Which rendition to stream. Both variants select a single file that carries
/// audio and video together, so no muxing is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityHint {
    #[default]
    Lowest,
    Highest,
}

/// Options forwarded to the messaging provider when a session is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionOptions {
    pub session: String,
    pub multidevice: bool,
    pub headless: bool,
    pub use_chrome: bool,
    pub browser_args: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            session: "downloader-bot".to_string(),
            multidevice: true,
            headless: true,
            use_chrome: false,
            browser_args: vec![
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
            ],
        }
    }
}
