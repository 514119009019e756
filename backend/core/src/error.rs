use thiserror::Error;

/// Top-level error type for the tubewire bot.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("session start failed: {0}")]
    SessionStart(String),

    #[error("messaging provider error: {0}")]
    Provider(String),

    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    #[error("metadata lookup failed: {0}")]
    Metadata(String),

    #[error("media stream failed: {0}")]
    Stream(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BotError = io.into();
        assert!(matches!(err, BotError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn display_includes_detail() {
        let err = BotError::Metadata("video unavailable".into());
        assert_eq!(err.to_string(), "metadata lookup failed: video unavailable");
    }
}
