//! WebSocket stream handler pushing JPEG frames at a fixed rate.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade request must carry `?token=<JWT>`; missing, malformed, or
//!    expired tokens are refused with 401 before the upgrade.
//! 2. After upgrade, a fresh synthetic scene is created for the connection
//!    and one frame is sent per tick.
//! 3. The loop ends when the client closes or a send fails. A frame that
//!    cannot be encoded closes the socket with 1011 (internal error).
//!
//! Inbound messages are read only to notice the close; their content is
//! ignored.

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::scene::{FrameSource, Scene};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    token: Option<String>,
}

pub async fn handle_stream(
    State(state): State<AppState>,
    Query(params): Query<StreamQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(token) = params.token else {
        return (StatusCode::UNAUTHORIZED, "token required").into_response();
    };

    let claims = match state.signer.verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "stream: token rejected");
            return (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response();
        }
    };

    ws.on_upgrade(move |socket| run_stream(socket, state, claims.sub))
}

async fn run_stream(mut socket: WebSocket, state: AppState, user_id: String) {
    let _active = state.enter_stream();
    info!(%user_id, active = state.active_streams(), "stream: client connected");

    let scene = Scene::random(&state.config.scene, &mut rand::rng());
    let mut source = FrameSource::new(scene, state.config.jpeg_quality);
    let mut ticker = tokio::time::interval(state.config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut sent: u64 = 0;
    loop {
        tokio::select! {
            msg = socket.recv() => match msg {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Err(e)) => {
                    debug!(%user_id, error = %e, "stream: receive failed");
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = ticker.tick() => {
                let frame = match source.next_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!(%user_id, error = %e, "stream: frame encode failed");
                        let close = CloseFrame { code: close_code::ERROR, reason: Utf8Bytes::from_static("frame encode failed") };
                        if let Err(e) = socket.send(Message::Close(Some(close))).await {
                            debug!(%user_id, error = %e, "stream: close send failed");
                        }
                        break;
                    }
                };
                if socket.send(Message::Binary(frame.into())).await.is_err() {
                    break;
                }
                sent += 1;
            }
        }
    }

    info!(%user_id, frames = sent, "stream: client disconnected");
}

#[cfg(test)]
#[path = "stream_test.rs"]
mod tests;
