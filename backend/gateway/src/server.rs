//! Main HTTP Gateway Server.

use anyhow::Result;
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use tubewire_core::BotContext;
use tubewire_dispatcher::BotLauncher;

use crate::{bot_api, control_ui, health_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub ctx: Arc<BotContext>,
    pub launcher: Arc<BotLauncher>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(ctx: Arc<BotContext>, launcher: Arc<BotLauncher>) -> Self {
        Self {
            ctx,
            launcher,
            started_at: Instant::now(),
        }
    }
}

pub fn build_router(state: GatewayState, static_dir: &Path) -> Router {
    Router::new()
        .route("/pair-code", get(bot_api::pair_code))
        .route("/start-bot", get(bot_api::start_bot))
        .route("/api/health", get(health_api::get_health))
        .merge(control_ui::ui_router(static_dir))
        .with_state(state)
}

/// Serve the gateway on an already-bound listener until the process exits.
pub async fn start_server(listener: TcpListener, state: GatewayState, static_dir: &Path) -> Result<()> {
    let app = build_router(state, static_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!(addr = %listener.local_addr()?, static_dir = %static_dir.display(), "Gateway HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tokio::sync::mpsc;
    use tower::ServiceExt;
    use tubewire_dispatcher::testing::RecordingProvider;

    struct Fixture {
        ctx: Arc<BotContext>,
        provider: Arc<RecordingProvider>,
        router: Router,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>tubewire</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

        let ctx = Arc::new(BotContext::new());
        let provider = Arc::new(RecordingProvider::new());
        let (tx, _rx) = mpsc::channel(8);
        let launcher = Arc::new(BotLauncher::new(ctx.clone(), provider.clone(), tx, "downloader-bot"));
        let router = build_router(GatewayState::new(ctx.clone(), launcher), dir.path());
        Fixture { ctx, provider, router, _dir: dir }
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let resp = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(router: &Router, uri: &str) -> Value {
        let (status, body) = get(router, uri).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn pair_code_before_start_is_placeholder() {
        let f = fixture();
        let json = get_json(&f.router, "/pair-code").await;
        assert_eq!(json, serde_json::json!({"pairCode": "Generating...", "status": "Disconnected"}));
    }

    #[tokio::test]
    async fn pair_code_reports_stored_code() {
        let f = fixture();
        get_json(&f.router, "/start-bot").await;
        f.ctx.set_pair_code("K3J9-PQ2X").await;

        let json = get_json(&f.router, "/pair-code").await;
        assert_eq!(json["pairCode"], "K3J9-PQ2X");
        assert_eq!(json["status"], "Connected");
    }

    #[tokio::test]
    async fn second_start_reports_already_running() {
        let f = fixture();
        let first = get_json(&f.router, "/start-bot").await;
        let second = get_json(&f.router, "/start-bot").await;
        assert_eq!(first["message"], "Bot starting...");
        assert_eq!(second["message"], "Bot already running");

        for _ in 0..100 {
            if f.provider.start_calls() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(f.provider.start_calls(), 1);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let f = fixture();
        let json = get_json(&f.router, "/api/health").await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "tubewire");
        assert!(json["session"].is_null());
    }

    #[tokio::test]
    async fn health_reports_started_session() {
        let f = fixture();
        get_json(&f.router, "/start-bot").await;

        let json = get_json(&f.router, "/api/health").await;
        assert_eq!(json["session"]["session_name"], "downloader-bot");
    }

    #[tokio::test]
    async fn serves_dashboard_and_static_files() {
        let f = fixture();
        let (status, body) = get(&f.router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>tubewire</h1>");

        let (status, _) = get(&f.router, "/app.js").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(&f.router, "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
