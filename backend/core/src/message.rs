use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suffix WhatsApp uses for group chat JIDs.
pub const GROUP_JID_SUFFIX: &str = "@g.us";

/// Whether a chat JID refers to a group.
pub fn is_group_jid(jid: &str) -> bool {
    jid.ends_with(GROUP_JID_SUFFIX)
}

/// A chat message delivered to the bot's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: String,
    /// Sender JID; replies go back to this address.
    pub from: String,
    pub body: String,
    #[serde(default)]
    pub is_group: bool,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(id: impl Into<String>, from: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            body: body.into(),
            is_group: false,
            timestamp: Utc::now(),
        }
    }

    pub fn in_group(mut self) -> Self {
        self.is_group = true;
        self
    }

    /// True when the provider flagged the message as a group message or the
    /// sender address is a group JID.
    pub fn is_from_group(&self) -> bool {
        self.is_group || is_group_jid(&self.from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_jid_suffix() {
        assert!(is_group_jid("120363041234567890@g.us"));
        assert!(!is_group_jid("15551234567@c.us"));
    }

    #[test]
    fn direct_message_is_not_group() {
        let msg = InboundMessage::new("1", "15551234567@c.us", "hi");
        assert!(!msg.is_from_group());
    }

    #[test]
    fn group_detected_by_flag_or_jid() {
        let flagged = InboundMessage::new("1", "15551234567@c.us", "hi").in_group();
        assert!(flagged.is_from_group());

        let by_jid = InboundMessage::new("2", "120363041234567890@g.us", "hi");
        assert!(by_jid.is_from_group());
    }
}
