use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tubewire_commands::{
    build_default_dispatcher, detect_command, CommandContext, CommandDispatcher,
    CommandInvocation, CommandRegistry,
};
use tubewire_core::{BotContext, BotEvent, Component, InboundMessage, MessagingProvider, SessionState};
use tubewire_logging::{redact_jid, BotActivity, BotEventLogger};
use tubewire_media::contains_youtube_link;

use crate::download::DownloadHandler;

/// What to do with an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Ignore,
    Command(CommandInvocation),
    Download,
}

/// Route a message. Group chats are checked first, then exact commands, then links.
pub fn classify(msg: &InboundMessage, registry: &CommandRegistry) -> Route {
    if msg.is_from_group() {
        return Route::Ignore;
    }
    if let Some(inv) = detect_command(&msg.body, registry) {
        return Route::Command(inv);
    }
    if contains_youtube_link(&msg.body) {
        return Route::Download;
    }
    Route::Ignore
}

/// The single consumer of the event bus.
///
/// Classification happens inline, in arrival order. Every provider call
/// (pairing code fetch, command reply, download) runs in its own task, so a
/// stalled bridge request only holds up the flow that made it.
pub struct Dispatcher {
    ctx: Arc<BotContext>,
    provider: Arc<dyn MessagingProvider>,
    downloads: Arc<DownloadHandler>,
    registry: CommandRegistry,
    commands: Arc<CommandDispatcher>,
}

impl Dispatcher {
    pub fn new(
        ctx: Arc<BotContext>,
        provider: Arc<dyn MessagingProvider>,
        downloads: Arc<DownloadHandler>,
    ) -> Self {
        Self {
            ctx,
            provider,
            downloads,
            registry: CommandRegistry::new(),
            commands: Arc::new(build_default_dispatcher()),
        }
    }

    /// Handle one event. Returns the task spawned for it, if any.
    pub async fn handle_event(&self, event: BotEvent) -> Option<JoinHandle<()>> {
        match event {
            BotEvent::StateChanged(state) => self.on_state(state),
            BotEvent::MessageReceived(msg) => self.on_message(msg),
        }
    }

    fn on_state(&self, state: SessionState) -> Option<JoinHandle<()>> {
        match state {
            SessionState::AwaitingPairing => {
                let ctx = self.ctx.clone();
                let provider = self.provider.clone();
                return Some(tokio::spawn(async move {
                    match provider.pairing_code().await {
                        Ok(code) => {
                            info!(pair_code = %code, "Pairing code issued");
                            ctx.set_pair_code(code).await;
                        }
                        Err(e) => error!(error = %e, "Failed to fetch pairing code"),
                    }
                }));
            }
            SessionState::Connected => info!("WhatsApp connected; bot is ready"),
            SessionState::Disconnected => warn!("WhatsApp session disconnected"),
            SessionState::Other(raw) => debug!(state = %raw, "WhatsApp state changed"),
        }
        None
    }

    fn on_message(&self, msg: InboundMessage) -> Option<JoinHandle<()>> {
        if msg.is_from_group() {
            debug!(from = %redact_jid(&msg.from), "Group message ignored");
            return None;
        }
        BotEventLogger::log(&msg.from, BotActivity::MessageReceived { body: msg.body.clone() });

        match classify(&msg, &self.registry) {
            Route::Ignore => None,
            Route::Command(inv) => {
                let commands = self.commands.clone();
                let provider = self.provider.clone();
                Some(tokio::spawn(async move {
                    let cmd_ctx = CommandContext { sender: msg.from.clone() };
                    match commands.dispatch(&cmd_ctx, &inv).await {
                        Ok(Some(reply)) => {
                            if let Err(e) = provider.send_text(&msg.from, &reply.text).await {
                                warn!(command = %inv.key, error = %e, "Failed to send command reply");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => error!(command = %inv.key, error = %e, "Command handler failed"),
                    }
                }))
            }
            Route::Download => {
                let downloads = self.downloads.clone();
                Some(tokio::spawn(async move {
                    downloads.handle_download(&msg).await;
                }))
            }
        }
    }
}

#[async_trait]
impl Component for Dispatcher {
    fn name(&self) -> &str {
        "dispatcher"
    }

    async fn start(&self, mut rx: mpsc::Receiver<BotEvent>) -> Result<()> {
        info!("Dispatcher started");
        while let Some(event) = rx.recv().await {
            // Spawned tasks run detached.
            let _ = self.handle_event(event).await;
        }
        info!("Event channel closed; dispatcher stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{ACK_TEXT, DOWNLOAD_FAILED_TEXT};
    use crate::testing::{FakeMediaSource, RecordingProvider, Sent, StreamBehavior};
    use std::time::Duration;
    use tempfile::TempDir;
    use tubewire_commands::HELP_TEXT;

    const CHAT: &str = "15551234567@c.us";
    const GROUP: &str = "120363041234567890@g.us";
    const LINK: &str = "https://youtu.be/dQw4w9WgXcQ";

    struct Harness {
        ctx: Arc<BotContext>,
        provider: Arc<RecordingProvider>,
        source: Arc<FakeMediaSource>,
        dispatcher: Dispatcher,
        _dir: TempDir,
    }

    fn harness_with(provider: RecordingProvider, behavior: StreamBehavior) -> Harness {
        let dir = TempDir::new().unwrap();
        let ctx = Arc::new(BotContext::new());
        let provider = Arc::new(provider);
        let source = Arc::new(FakeMediaSource::new("Clip", 125, behavior));
        let downloads = Arc::new(DownloadHandler::new(provider.clone(), source.clone(), dir.path()));
        let dispatcher = Dispatcher::new(ctx.clone(), provider.clone(), downloads);
        Harness { ctx, provider, source, dispatcher, _dir: dir }
    }

    fn harness() -> Harness {
        harness_with(RecordingProvider::new(), StreamBehavior::Bytes(b"mp4".to_vec()))
    }

    fn message(body: &str) -> BotEvent {
        BotEvent::MessageReceived(InboundMessage::new("m1", CHAT, body))
    }

    /// Handle an event and wait for whatever task it spawned.
    async fn settle(dispatcher: &Dispatcher, event: BotEvent) {
        if let Some(task) = dispatcher.handle_event(event).await {
            task.await.unwrap();
        }
    }

    async fn wait_until(cond: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !cond() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not met in time");
    }

    #[test]
    fn classify_routes_in_priority_order() {
        let registry = CommandRegistry::new();
        let dm = |body: &str| InboundMessage::new("m", CHAT, body);

        assert_eq!(classify(&dm("hello"), &registry), Route::Ignore);
        assert!(matches!(classify(&dm("!help"), &registry), Route::Command(inv) if inv.key == "help"));
        assert!(matches!(classify(&dm("/help"), &registry), Route::Command(_)));
        assert_eq!(classify(&dm(LINK), &registry), Route::Download);
        assert_eq!(classify(&dm("!help youtube.com"), &registry), Route::Download);
        assert_eq!(classify(&dm("!help please"), &registry), Route::Ignore);

        assert_eq!(classify(&InboundMessage::new("m", GROUP, "!help"), &registry), Route::Ignore);
        assert_eq!(classify(&InboundMessage::new("m", CHAT, LINK).in_group(), &registry), Route::Ignore);
    }

    #[tokio::test]
    async fn group_messages_get_no_reply() {
        let h = harness();
        for body in ["!help", LINK, "hello"] {
            let event = BotEvent::MessageReceived(InboundMessage::new("m", GROUP, body));
            assert!(h.dispatcher.handle_event(event).await.is_none());
        }
        assert!(h.provider.sent().is_empty());
        assert_eq!(h.source.resolves(), 0);
    }

    #[tokio::test]
    async fn help_reply_is_exact() {
        let h = harness();
        settle(&h.dispatcher, message("!help")).await;
        settle(&h.dispatcher, message("/help")).await;
        settle(&h.dispatcher, message("help")).await;
        assert_eq!(
            h.provider.sent(),
            vec![
                Sent::Text { to: CHAT.into(), text: HELP_TEXT.into() },
                Sent::Text { to: CHAT.into(), text: HELP_TEXT.into() },
            ]
        );
    }

    #[tokio::test]
    async fn each_link_message_downloads_once() {
        let h = harness();
        let task = h
            .dispatcher
            .handle_event(message(&format!("two copies {LINK} {LINK}")))
            .await
            .expect("download task");
        task.await.unwrap();

        assert_eq!(h.source.resolves(), 1);
        assert_eq!(h.source.opens(), 1);
        let sent = h.provider.sent();
        assert_eq!(sent.iter().filter(|s| matches!(s, Sent::File { .. })).count(), 1);
        assert_eq!(h.provider.texts()[0], ACK_TEXT);
    }

    #[tokio::test]
    async fn stream_failure_does_not_stop_the_loop() {
        let h = harness_with(
            RecordingProvider::new(),
            StreamBehavior::FailMidway(b"par".to_vec()),
        );
        let task = h.dispatcher.handle_event(message(LINK)).await.unwrap();
        task.await.unwrap();
        settle(&h.dispatcher, message("!help")).await;

        let texts = h.provider.texts();
        assert_eq!(texts.iter().filter(|t| *t == DOWNLOAD_FAILED_TEXT).count(), 1);
        assert_eq!(texts.last().map(String::as_str), Some(HELP_TEXT));
    }

    #[tokio::test]
    async fn other_messages_are_ignored() {
        let h = harness();
        assert!(h.dispatcher.handle_event(message("hi there")).await.is_none());
        assert!(h.provider.sent().is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with an info-level subscriber and return what it printed.
    fn capture_logs(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn direct_messages_are_logged_with_redacted_sender() {
        let h = harness();
        let logs = capture_logs(|| {
            let msg = InboundMessage::new("m", CHAT, "hi there");
            assert!(h.dispatcher.on_message(msg).is_none());
        });
        assert!(logs.contains("bot_events"));
        assert!(logs.contains("message_received"));
        assert!(logs.contains("hi there"));
        assert!(logs.contains("***4567@c.us"));
        assert!(!logs.contains("15551234567"));
    }

    #[tokio::test]
    async fn group_messages_are_not_logged_at_info() {
        let h = harness();
        let logs = capture_logs(|| {
            let msg = InboundMessage::new("m", GROUP, "hi there");
            assert!(h.dispatcher.on_message(msg).is_none());
        });
        assert!(!logs.contains("message_received"));
    }

    #[tokio::test]
    async fn awaiting_pairing_stores_code() {
        let h = harness_with(
            RecordingProvider::new().with_pairing_code("K3J9-PQ2X"),
            StreamBehavior::Bytes(vec![]),
        );
        settle(&h.dispatcher, BotEvent::StateChanged(SessionState::AwaitingPairing)).await;
        assert_eq!(h.ctx.pair_code().await.as_deref(), Some("K3J9-PQ2X"));
    }

    #[tokio::test]
    async fn pairing_code_failure_leaves_placeholder() {
        let h = harness();
        settle(&h.dispatcher, BotEvent::StateChanged(SessionState::AwaitingPairing)).await;
        assert!(h
            .dispatcher
            .handle_event(BotEvent::StateChanged(SessionState::Connected))
            .await
            .is_none());
        assert_eq!(h.ctx.pair_code_or_placeholder().await, "Generating...");
    }

    #[tokio::test]
    async fn start_drains_channel_until_closed() {
        let h = harness();
        let (tx, rx) = mpsc::channel(8);
        tx.send(message("!help")).await.unwrap();
        tx.send(message("/help")).await.unwrap();
        drop(tx);

        h.dispatcher.start(rx).await.unwrap();
        wait_until(|| h.provider.texts().len() == 2).await;
        assert_eq!(h.provider.texts(), vec![HELP_TEXT, HELP_TEXT]);
    }

    #[tokio::test]
    async fn stalled_pairing_code_does_not_block_messages() {
        let h = harness_with(
            RecordingProvider::new().hanging_pairing_code(),
            StreamBehavior::Bytes(vec![]),
        );
        let provider = h.provider.clone();
        let dispatcher = Arc::new(h.dispatcher);
        let (tx, rx) = mpsc::channel(8);
        let loop_task = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.start(rx).await })
        };

        tx.send(BotEvent::StateChanged(SessionState::AwaitingPairing)).await.unwrap();
        tx.send(message("!help")).await.unwrap();

        wait_until(|| provider.texts().len() == 1).await;
        assert_eq!(provider.texts(), vec![HELP_TEXT]);
        assert_eq!(h.ctx.pair_code_or_placeholder().await, "Generating...");

        drop(tx);
        loop_task.await.unwrap().unwrap();
    }
}
