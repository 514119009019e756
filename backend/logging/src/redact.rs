//! Log Redaction
//!
//! Masks phone numbers and WhatsApp JIDs before they reach log output.

use regex::Regex;
use std::sync::LazyLock;

static JID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(\d{4})@(c\.us|s\.whatsapp\.net|g\.us|lid)").unwrap()
});
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

/// Mask all but the last four digits of a WhatsApp JID.
///
/// `15551234567@c.us` becomes `***4567@c.us`. Strings that are not JIDs are
/// returned unchanged.
pub fn redact_jid(jid: &str) -> String {
    JID_RE.replace_all(jid, "***$2@$3").to_string()
}

/// Redacts JIDs and free-standing phone numbers in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = redact_jid(input);
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .to_string()
}
