//! WhatsApp JID helpers
//!
//! Normalizes recipients. Group detection lives on
//! [`tubewire_core::InboundMessage::is_from_group`].

/// Direct chat JIDs as used by WhatsApp Web.
pub const CONTACT_SUFFIX: &str = "@c.us";

/// Turn a bare phone number into a contact JID; JIDs pass through unchanged.
pub fn normalize_recipient(recipient: &str) -> String {
    let trimmed = recipient.trim();
    if trimmed.contains('@') {
        return trimmed.to_string();
    }
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{digits}{CONTACT_SUFFIX}")
}
