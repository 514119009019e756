//! Bot control endpoints used by the dashboard.

use axum::{extract::State, Json};
use serde::Serialize;

use tubewire_dispatcher::StartOutcome;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCodeResponse {
    pub pair_code: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StartBotResponse {
    pub message: &'static str,
}

/// Handler for `GET /pair-code`
///
/// `status` reflects whether a session was started, not live connectivity.
pub async fn pair_code(State(state): State<GatewayState>) -> Json<PairCodeResponse> {
    let status = if state.ctx.has_session().await {
        "Connected"
    } else {
        "Disconnected"
    };
    Json(PairCodeResponse {
        pair_code: state.ctx.pair_code_or_placeholder().await,
        status,
    })
}

/// Handler for `GET /start-bot`
pub async fn start_bot(State(state): State<GatewayState>) -> Json<StartBotResponse> {
    let message = match state.launcher.start_if_idle().await {
        StartOutcome::Started => "Bot starting...",
        StartOutcome::AlreadyRunning => "Bot already running",
    };
    Json(StartBotResponse { message })
}
