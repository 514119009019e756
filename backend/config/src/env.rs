//! Environment variable overrides.
//!
//! Variables win over the config file. `PORT` keeps its conventional name so
//! the bot runs unchanged on hosts that inject it.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::TubewireConfig;

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND: &str = "TUBEWIRE_BIND";
pub const ENV_BRIDGE_URL: &str = "WA_BRIDGE_URL";
pub const ENV_SESSION: &str = "WA_SESSION";
pub const ENV_YTDLP_PATH: &str = "YTDLP_PATH";
pub const ENV_TEMP_DIR: &str = "TUBEWIRE_TEMP_DIR";
pub const ENV_STATIC_DIR: &str = "TUBEWIRE_STATIC_DIR";
pub const ENV_LOG_DIR: &str = "TUBEWIRE_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: TubewireConfig) -> Result<TubewireConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
///
/// Empty values are treated as unset.
pub fn apply_env_overrides_with(
    mut config: TubewireConfig,
    env: &HashMap<String, String>,
) -> Result<TubewireConfig> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(port) = get(ENV_PORT) {
        config.server.port = port
            .parse()
            .with_context(|| format!("{ENV_PORT} must be a port number, got \"{port}\""))?;
    }
    if let Some(bind) = get(ENV_BIND) {
        config.server.bind_address = bind.to_string();
    }
    if let Some(dir) = get(ENV_STATIC_DIR) {
        config.server.static_dir = PathBuf::from(dir);
    }
    if let Some(url) = get(ENV_BRIDGE_URL) {
        config.whatsapp.bridge_url = url.to_string();
    }
    if let Some(session) = get(ENV_SESSION) {
        config.whatsapp.session.session = session.to_string();
    }
    if let Some(path) = get(ENV_YTDLP_PATH) {
        config.downloader.ytdlp_path = path.to_string();
    }
    if let Some(dir) = get(ENV_TEMP_DIR) {
        config.downloader.temp_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.level = level.to_string();
    }

    Ok(config)
}
