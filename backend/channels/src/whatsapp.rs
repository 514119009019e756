//! WhatsApp Web provider backed by an HTTP bridge.
//!
//! The bridge is a sidecar that drives WhatsApp Web in a headless browser:
//!
//! ```text
//! [WhatsApp] <--WS--> [browser bridge :3001] <--HTTP--> [tubewire]
//! ```
//!
//! Endpoints used:
//! - `POST /sessions`: create the session
//! - `GET  /sessions/{session}/events?cursor=N`: poll state changes and messages
//! - `GET  /sessions/{session}/pairing-code`: current pairing code
//! - `POST /sessions/{session}/send-text`: text message
//! - `POST /sessions/{session}/send-file`: multipart file message

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tubewire_core::{
    BotError, BotEvent, InboundMessage, MessagingProvider, SessionOptions, SessionState,
};

use crate::wa_groups::normalize_recipient;
use crate::wa_media::build_file_form;

// Bridge wire payloads

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<BridgeEvent>,
    cursor: u64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BridgeEvent {
    State { state: String },
    Message(BridgeMessage),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeMessage {
    id: String,
    from: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    is_group_msg: bool,
    /// Unix seconds.
    timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PairingCodeResponse {
    code: String,
}

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    to: String,
    text: &'a str,
}

impl From<BridgeEvent> for BotEvent {
    fn from(event: BridgeEvent) -> Self {
        match event {
            BridgeEvent::State { state } => {
                BotEvent::StateChanged(SessionState::from_provider(&state))
            }
            BridgeEvent::Message(m) => {
                let timestamp = m
                    .timestamp
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                    .unwrap_or_else(Utc::now);
                BotEvent::MessageReceived(InboundMessage {
                    is_group: m.is_group_msg,
                    id: m.id,
                    from: m.from,
                    body: m.body,
                    timestamp,
                })
            }
        }
    }
}

/// [`MessagingProvider`] that talks to a WhatsApp Web bridge over HTTP.
pub struct WhatsAppBridgeProvider {
    base_url: String,
    options: SessionOptions,
    poll_interval: Duration,
    client: Client,
}

impl WhatsAppBridgeProvider {
    pub fn new(base_url: &str, options: SessionOptions, poll_interval_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            options,
            poll_interval: Duration::from_millis(poll_interval_ms),
            client: Client::new(),
        }
    }

    fn session_url(&self, endpoint: &str) -> String {
        format!("{}/sessions/{}/{}", self.base_url, self.options.session, endpoint)
    }
}

/// Background loop that polls the bridge and forwards events in order.
struct EventPoller {
    client: Client,
    url: String,
    interval: Duration,
    cursor: u64,
}

impl EventPoller {
    fn new(client: Client, url: String, interval: Duration) -> Self {
        Self {
            client,
            url,
            interval,
            cursor: 0,
        }
    }

    async fn poll_once(&mut self) -> Result<Vec<BotEvent>, BotError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("cursor", self.cursor)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::Provider(format!("event poll failed: {e}")))?;

        let batch: EventsResponse = resp
            .json()
            .await
            .map_err(|e| BotError::Provider(format!("bad event payload: {e}")))?;

        self.cursor = batch.cursor;
        Ok(batch.events.into_iter().map(BotEvent::from).collect())
    }

    async fn run(mut self, events: mpsc::Sender<BotEvent>) {
        loop {
            if events.is_closed() {
                break;
            }
            match self.poll_once().await {
                Ok(batch) => {
                    for event in batch {
                        if events.send(event).await.is_err() {
                            debug!("Event receiver dropped; stopping WhatsApp poller");
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "WhatsApp bridge poll error"),
            }
            tokio::time::sleep(self.interval).await;
        }
        debug!("WhatsApp poller stopped");
    }
}

#[async_trait]
impl MessagingProvider for WhatsAppBridgeProvider {
    fn name(&self) -> &str {
        "whatsapp-bridge"
    }

    async fn start_session(&self, events: mpsc::Sender<BotEvent>) -> Result<(), BotError> {
        info!(bridge = %self.base_url, session = %self.options.session, "Creating WhatsApp session");

        self.client
            .post(format!("{}/sessions", self.base_url))
            .json(&self.options)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::SessionStart(e.to_string()))?;

        let poller = EventPoller::new(
            self.client.clone(),
            self.session_url("events"),
            self.poll_interval,
        );
        tokio::spawn(poller.run(events));

        info!(session = %self.options.session, "WhatsApp session created; polling for events");
        Ok(())
    }

    async fn pairing_code(&self) -> Result<String, BotError> {
        let resp: PairingCodeResponse = self
            .client
            .get(self.session_url("pairing-code"))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::Provider(format!("pairing code request failed: {e}")))?
            .json()
            .await
            .map_err(|e| BotError::Provider(format!("bad pairing code payload: {e}")))?;
        Ok(resp.code)
    }

    async fn send_text(&self, recipient: &str, text: &str) -> Result<(), BotError> {
        let body = SendTextRequest {
            to: normalize_recipient(recipient),
            text,
        };
        self.client
            .post(self.session_url("send-text"))
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::Provider(format!("send text failed: {e}")))?;
        Ok(())
    }

    async fn send_file(
        &self,
        recipient: &str,
        path: &Path,
        filename: &str,
        caption: &str,
    ) -> Result<(), BotError> {
        let form = build_file_form(&normalize_recipient(recipient), path, filename, caption).await?;
        self.client
            .post(self.session_url("send-file"))
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::Delivery(format!("send file failed: {e}")))?;
        Ok(())
    }
}
