pub mod channel;
pub mod context;
pub mod error;
pub mod event;
pub mod message;
pub mod stream;
pub mod traits;
pub mod types;

pub use channel::EventBus;
pub use context::{BotContext, SessionHandle, PAIR_CODE_PLACEHOLDER};
pub use error::BotError;
pub use event::{BotEvent, SessionState};
pub use message::{is_group_jid, InboundMessage, GROUP_JID_SUFFIX};
pub use stream::MediaStream;
pub use traits::{Component, MediaSource, MessagingProvider};
pub use types::{QualityHint, SessionOptions, VideoMetadata};
