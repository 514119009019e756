//! Telemetry and structured logging components for tubewire.
//!
//! Handles log redaction, console and rolling JSON output, and structured bot
//! activity events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{BotActivity, BotEventLogger, EventLogEntry};
pub use logger::init_logger;
pub use redact::{redact_jid, redact_sensitive_data};
