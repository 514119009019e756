//! Media byte stream handed out by a [`MediaSource`](crate::MediaSource).

use futures::future::BoxFuture;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::error::BotError;

/// An async byte stream plus an optional completion check.
///
/// Producers that can fail after their output ends (a child process exiting
/// non-zero) report that through the completion future, which is awaited once
/// the reader hits EOF.
pub struct MediaStream {
    reader: Pin<Box<dyn AsyncRead + Send>>,
    completion: Option<BoxFuture<'static, Result<(), BotError>>>,
}

impl MediaStream {
    pub fn new(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            reader: Box::pin(reader),
            completion: None,
        }
    }

    pub fn with_completion(mut self, completion: BoxFuture<'static, Result<(), BotError>>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Copy the whole stream into `writer` and return the number of bytes written.
    pub async fn pipe_to<W>(mut self, writer: &mut W) -> Result<u64, BotError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let written = tokio::io::copy(&mut self.reader, writer)
            .await
            .map_err(|e| BotError::Stream(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| BotError::Stream(e.to_string()))?;

        if let Some(completion) = self.completion.take() {
            completion.await?;
        }
        Ok(written)
    }
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}
