use serde::{Deserialize, Serialize};

use crate::message::InboundMessage;

/// Events pushed by the messaging provider onto the [`EventBus`](crate::EventBus).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotEvent {
    /// The provider's connection state transitioned
    StateChanged(SessionState),
    /// A message addressed to the session arrived
    MessageReceived(InboundMessage),
}

/// Connection state reported by the messaging provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for a companion device to enter the pairing code
    AwaitingPairing,
    /// Session is authenticated and receiving messages
    Connected,
    /// Session was closed, unpaired, or taken over elsewhere
    Disconnected,
    /// Any provider state this bot does not act on
    Other(String),
}

impl SessionState {
    /// Map a raw provider state string onto a known state.
    ///
    /// Matching ignores case, dashes and underscores, so `pairingCode`,
    /// `PAIRING_CODE` and `pairing-code` are the same state.
    pub fn from_provider(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pairingcode" | "pairing" | "awaitingpairing" => Self::AwaitingPairing,
            "connected" | "islogged" | "mainready" => Self::Connected,
            "disconnected" | "unpaired" | "unpairedidle" | "conflict" | "unlaunched" => {
                Self::Disconnected
            }
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingPairing => write!(f, "awaiting_pairing"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}
