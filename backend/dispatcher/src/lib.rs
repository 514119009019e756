pub mod dispatcher;
pub mod download;
pub mod launcher;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use dispatcher::{classify, Dispatcher, Route};
pub use download::{DownloadHandler, ACK_TEXT, DOWNLOAD_FAILED_TEXT, METADATA_FAILED_TEXT};
pub use launcher::{BotLauncher, StartOutcome};
