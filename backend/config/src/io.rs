//! Config file discovery and loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::TubewireConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the tubewire config directory.
/// Priority: `TUBEWIRE_CONFIG_DIR` env > `~/.tubewire/` > `./.tubewire`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TUBEWIRE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tubewire");
    }
    PathBuf::from(".tubewire")
}

/// Resolve the full path to the main config file.
///
/// `TUBEWIRE_CONFIG` names the file directly and takes precedence.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    if let Ok(file) = std::env::var("TUBEWIRE_CONFIG") {
        return PathBuf::from(file);
    }
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<TubewireConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(TubewireConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(TubewireConfig::default());
    }

    let config: TubewireConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_dir_env_override() {
        std::env::set_var("TUBEWIRE_CONFIG_DIR", "/srv/tubewire");
        let dir = config_dir();
        std::env::remove_var("TUBEWIRE_CONFIG_DIR");
        assert_eq!(dir, PathBuf::from("/srv/tubewire"));
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert_eq!(cfg.server.port, 3000);
    }

    #[tokio::test]
    async fn reads_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "downloader:\n  ytdlpPath: /opt/yt-dlp\n").unwrap();

        let cfg = load_config(&path).await.unwrap();
        assert_eq!(cfg.downloader.ytdlp_path, "/opt/yt-dlp");
    }

    #[tokio::test]
    async fn malformed_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "server: [unclosed").unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
