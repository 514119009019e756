//! `tubewire-config`: runtime configuration for the tubewire bot.
//!
//! Provides:
//! - Typed config schema (server, WhatsApp bridge, downloader, logging)
//! - YAML loading with a defaults-only first run
//! - Environment variable overrides (`PORT`, `WA_BRIDGE_URL`, ...)
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config};
pub use schema::{DownloaderConfig, LoggingConfig, ServerConfig, TubewireConfig, WhatsAppConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::path::Path;

/// Load the config file, then apply env overrides and defaults.
///
/// Logging is usually configured from the result, so nothing here is
/// reported yet; call [`ensure_valid`] once a subscriber is installed.
pub async fn load_and_prepare(path: &Path) -> Result<TubewireConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config)?;
    Ok(apply_all_defaults(config))
}

/// Validate a prepared config, logging every warning and error.
pub fn ensure_valid(config: &TubewireConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("configuration has {} error(s)", report.errors.len());
    }
    Ok(())
}
