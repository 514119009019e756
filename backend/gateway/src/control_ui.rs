//! Dashboard static asset server.

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::server::GatewayState;

/// Serves `index.html` at `/` and every other file under `static_dir` by path.
/// Missing files are plain 404s.
pub fn ui_router(static_dir: &Path) -> Router<GatewayState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
}
