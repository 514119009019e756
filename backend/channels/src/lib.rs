//! Messaging channel adapters.
//!
//! The only channel is WhatsApp Web, reached through an HTTP bridge sidecar
//! that owns the headless browser session.

pub mod wa_groups;
pub mod wa_media;
pub mod whatsapp;

pub use whatsapp::WhatsAppBridgeProvider;
