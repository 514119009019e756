//! In-memory doubles for [`MessagingProvider`] and [`MediaSource`].

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::sync::mpsc;

use tubewire_core::{
    BotError, BotEvent, MediaSource, MediaStream, MessagingProvider, QualityHint, VideoMetadata,
};

/// One outbound message captured by [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        to: String,
        text: String,
    },
    File {
        to: String,
        path: PathBuf,
        filename: String,
        caption: String,
        /// File contents at the moment of sending.
        contents: Vec<u8>,
    },
}

/// Provider that records every call instead of talking to a bridge.
#[derive(Default)]
pub struct RecordingProvider {
    sent: Mutex<Vec<Sent>>,
    start_calls: AtomicUsize,
    fail_start: bool,
    fail_send_file: bool,
    hang_pairing_code: bool,
    pairing_code: Option<String>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn failing_send_file(mut self) -> Self {
        self.fail_send_file = true;
        self
    }

    /// `pairing_code` never resolves, like a bridge that stopped answering.
    pub fn hanging_pairing_code(mut self) -> Self {
        self.hang_pairing_code = true;
        self
    }

    pub fn with_pairing_code(mut self, code: &str) -> Self {
        self.pairing_code = Some(code.to_string());
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::File { .. } => None,
            })
            .collect()
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn start_session(&self, _events: mpsc::Sender<BotEvent>) -> Result<(), BotError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(BotError::SessionStart("bridge unreachable".into()));
        }
        Ok(())
    }

    async fn pairing_code(&self) -> Result<String, BotError> {
        if self.hang_pairing_code {
            std::future::pending::<()>().await;
        }
        self.pairing_code
            .clone()
            .ok_or_else(|| BotError::Provider("no pairing code".into()))
    }

    async fn send_text(&self, recipient: &str, text: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::Text {
            to: recipient.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_file(
        &self,
        recipient: &str,
        path: &Path,
        filename: &str,
        caption: &str,
    ) -> Result<(), BotError> {
        if self.fail_send_file {
            return Err(BotError::Delivery("upload rejected".into()));
        }
        let contents = tokio::fs::read(path).await?;
        self.sent.lock().unwrap().push(Sent::File {
            to: recipient.to_string(),
            path: path.to_path_buf(),
            filename: filename.to_string(),
            caption: caption.to_string(),
            contents,
        });
        Ok(())
    }
}

/// How [`FakeMediaSource::open_stream`] behaves.
#[derive(Debug, Clone)]
pub enum StreamBehavior {
    /// Yield these bytes and finish cleanly.
    Bytes(Vec<u8>),
    /// Fail before any byte is produced.
    FailOpen,
    /// Yield these bytes, then a read error.
    FailMidway(Vec<u8>),
    /// Yield these bytes, then report a failed producer exit.
    FailExit(Vec<u8>),
}

/// Media source serving canned metadata and streams.
pub struct FakeMediaSource {
    metadata: Option<VideoMetadata>,
    behavior: StreamBehavior,
    resolves: AtomicUsize,
    opens: AtomicUsize,
}

impl FakeMediaSource {
    pub fn new(title: &str, duration_secs: u64, behavior: StreamBehavior) -> Self {
        Self {
            metadata: Some(VideoMetadata {
                id: "dQw4w9WgXcQ".into(),
                title: title.into(),
                duration_secs,
            }),
            behavior,
            resolves: AtomicUsize::new(0),
            opens: AtomicUsize::new(0),
        }
    }

    /// A source whose metadata lookup always fails.
    pub fn unresolvable() -> Self {
        Self {
            metadata: None,
            behavior: StreamBehavior::FailOpen,
            resolves: AtomicUsize::new(0),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn resolves(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaSource for FakeMediaSource {
    fn name(&self) -> &str {
        "fake"
    }

    fn validate_url(&self, url: &str) -> bool {
        tubewire_media::is_youtube_url(url)
    }

    async fn resolve(&self, url: &str) -> Result<VideoMetadata, BotError> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .clone()
            .ok_or_else(|| BotError::Metadata(format!("video unavailable: {url}")))
    }

    async fn open_stream(&self, _url: &str, _quality: QualityHint) -> Result<MediaStream, BotError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StreamBehavior::Bytes(bytes) => Ok(MediaStream::new(io::Cursor::new(bytes.clone()))),
            StreamBehavior::FailOpen => Err(BotError::Stream("no formats available".into())),
            StreamBehavior::FailMidway(bytes) => Ok(MediaStream::new(
                io::Cursor::new(bytes.clone()).chain(FailingReader),
            )),
            StreamBehavior::FailExit(bytes) => Ok(MediaStream::new(io::Cursor::new(bytes.clone()))
                .with_completion(Box::pin(async {
                    Err::<(), _>(BotError::Stream("downloader exited with status 1".into()))
                }))),
        }
    }
}

/// Reader that fails on first poll.
pub struct FailingReader;

impl AsyncRead for FailingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset")))
    }
}
