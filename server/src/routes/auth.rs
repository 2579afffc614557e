//! `POST /auth/token`: issue a stream token for a user id.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Id used when the request body omits `user_id`.
pub const DEFAULT_USER_ID: &str = "js-test";

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_owned()
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: i64,
    pub websocket_url: &'static str,
    pub codec: &'static str,
}

pub async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, StatusCode> {
    let issued = state.signer.issue(&payload.user_id).map_err(|e| {
        tracing::error!(error = %e, "token issue failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!(user_id = %payload.user_id, expires_at = issued.expires_at, "token issued");
    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_at: issued.expires_at,
        websocket_url: "/stream/ws?token=<JWT>",
        codec: "mjpeg",
    }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
