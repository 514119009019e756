//! Config defaults: constants for every field plus the passes that fill in
//! values only known at runtime.

use crate::schema::TubewireConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default dashboard directory, relative to the working directory.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Default WhatsApp bridge base URL.
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:3001";

/// Default bridge event poll interval.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default yt-dlp executable.
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: TubewireConfig) -> TubewireConfig {
    let config = apply_downloader_defaults(config);
    let config = apply_logging_defaults(config);
    config
}

/// Stage downloads in the system temp dir unless configured.
fn apply_downloader_defaults(mut config: TubewireConfig) -> TubewireConfig {
    if config.downloader.temp_dir.is_none() {
        config.downloader.temp_dir = Some(std::env::temp_dir());
    }
    config
}

/// Empty log level falls back to the default filter.
fn apply_logging_defaults(mut config: TubewireConfig) -> TubewireConfig {
    if config.logging.level.trim().is_empty() {
        config.logging.level = DEFAULT_LOG_LEVEL.to_string();
    }
    config
}
