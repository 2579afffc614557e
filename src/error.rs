//! Viewer error type.

use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tungstenite::Error>),
    #[error("frame decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("frame decode task failed: {0}")]
    DecodeTask(#[from] tokio::task::JoinError),
    #[error("canvas snapshot failed: {0}")]
    Snapshot(#[from] canvas::SurfaceError),
    #[error("no canvas attached")]
    NoSurface,
    #[error("server returned HTTP {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<tungstenite::Error> for ClientError {
    fn from(error: tungstenite::Error) -> Self {
        Self::WsConnect(Box::new(error))
    }
}
