//! Bot Activity Logger
//!
//! Structured records for message handling and downloads, emitted through
//! `tracing` under the `bot_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotActivity {
    MessageReceived {
        body: String,
    },
    DownloadStarted {
        url: String,
    },
    DownloadCompleted {
        title: String,
        bytes: u64,
    },
    DownloadFailed {
        stage: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub chat: String,
    pub timestamp: DateTime<Utc>,
    pub activity: BotActivity,
}

impl EventLogEntry {
    /// Build an entry with the chat id and any free text redacted.
    pub fn new(chat: &str, mut activity: BotActivity) -> Self {
        match &mut activity {
            BotActivity::MessageReceived { body } => {
                *body = redact_sensitive_data(body);
            }
            BotActivity::DownloadFailed { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            BotActivity::DownloadStarted { .. } | BotActivity::DownloadCompleted { .. } => {}
        }

        Self {
            chat: redact_sensitive_data(chat),
            timestamp: Utc::now(),
            activity,
        }
    }
}

pub struct BotEventLogger;

impl BotEventLogger {
    /// Log one bot activity record as a JSON string field.
    pub fn log(chat: &str, activity: BotActivity) {
        let entry = EventLogEntry::new(chat, activity);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "bot_events", event = %json, "Bot activity");
    }
}
