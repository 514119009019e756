//! tubewire HTTP front door
//!
//! Serves the pairing dashboard, the pairing status endpoint, and the
//! bot start trigger.

pub mod bot_api;
pub mod control_ui;
pub mod health_api;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
