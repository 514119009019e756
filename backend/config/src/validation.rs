//! Config validation: field checks with user-friendly error messages.

use crate::schema::TubewireConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &TubewireConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_whatsapp(config, &mut report);
    validate_downloader(config, &mut report);
    report
}

fn validate_server(config: &TubewireConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.port == 0 {
        report.error("server.port", "port must be > 0");
    } else if server.port < 1024 && server.port != 80 && server.port != 443 {
        report.warn(
            "server.port",
            format!("Port {} requires elevated privileges; consider using a port >= 1024", server.port),
        );
    }
    if server.bind_address.trim().is_empty() {
        report.error("server.bindAddress", "bind address cannot be empty");
    }
    if !server.static_dir.join("index.html").exists() {
        report.warn(
            "server.staticDir",
            format!("{} has no index.html; the dashboard will 404", server.static_dir.display()),
        );
    }
}

fn validate_whatsapp(config: &TubewireConfig, report: &mut ValidationReport) {
    let wa = &config.whatsapp;
    if !(wa.bridge_url.starts_with("http://") || wa.bridge_url.starts_with("https://")) {
        report.error("whatsapp.bridgeUrl", "bridge URL must start with http:// or https://");
    }
    if wa.session.session.trim().is_empty() {
        report.error("whatsapp.session.session", "session name cannot be empty");
    }
    if wa.poll_interval_ms == 0 {
        report.error("whatsapp.pollIntervalMs", "pollIntervalMs must be >= 1");
    }
}

fn validate_downloader(config: &TubewireConfig, report: &mut ValidationReport) {
    let dl = &config.downloader;
    if dl.ytdlp_path.trim().is_empty() {
        report.error("downloader.ytdlpPath", "yt-dlp path cannot be empty");
    }
    if let Some(dir) = &dl.temp_dir {
        if !dir.is_dir() {
            report.error(
                "downloader.tempDir",
                format!("{} is not an existing directory", dir.display()),
            );
        }
    }
}
