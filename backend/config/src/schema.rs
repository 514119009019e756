//! tubewire runtime configuration schema.
//!
//! Typed for serde YAML deserialization. Every section and field has a default,
//! so an empty or missing file yields a runnable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use tubewire_core::{QualityHint, SessionOptions};

use crate::defaults::{
    DEFAULT_BIND_ADDRESS, DEFAULT_BRIDGE_URL, DEFAULT_LOG_LEVEL, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_YTDLP_PATH,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TubewireConfig {
    /// HTTP front door
    pub server: ServerConfig,
    /// WhatsApp bridge and session options
    pub whatsapp: WhatsAppConfig,
    /// Video downloader
    pub downloader: DownloaderConfig,
    /// Log output
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Directory holding the dashboard (`index.html`) and its assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

// ---------------------------------------------------------------------------
// WhatsApp
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatsAppConfig {
    /// Base URL of the WhatsApp Web bridge sidecar.
    pub bridge_url: String,
    /// How often the bridge is polled for events.
    pub poll_interval_ms: u64,
    /// Options forwarded to the bridge on session creation.
    pub session: SessionOptions,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            session: SessionOptions::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Downloader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloaderConfig {
    /// Path or name of the yt-dlp executable.
    pub ytdlp_path: String,
    /// Staging directory for in-flight downloads. `None` means the system temp dir.
    pub temp_dir: Option<PathBuf>,
    pub quality: QualityHint,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: DEFAULT_YTDLP_PATH.to_string(),
            temp_dir: None,
            quality: QualityHint::Lowest,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rolling JSON log files. `None` disables file output.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
        }
    }
}
