//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the token endpoint, the frame stream, and a health
//! probe. When the configured site directory exists its files are served at
//! `/`, so the viewer page and the API share an origin and need no proxy.

pub mod auth;
pub mod stream;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let site_dir = state.config.site_dir.clone();

    let router = Router::new()
        .route("/auth/token", post(auth::issue_token))
        .route("/stream/ws", get(stream::handle_stream))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if site_dir.is_dir() {
        tracing::info!(site_dir = %site_dir.display(), "serving static site");
        router.fallback_service(ServeDir::new(site_dir).append_index_html_on_directories(true))
    } else {
        router
    }
}

/// Serve the router for `state` on an already bound listener until the
/// server stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "codec": "mjpeg",
        "source": "synthetic",
        "active_streams": state.active_streams(),
    }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
