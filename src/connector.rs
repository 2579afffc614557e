//! Stream connection.
//!
//! LIFECYCLE
//! =========
//! `Connection::open` spawns a task and returns immediately, like
//! constructing a browser `WebSocket`. The task reports to the status label:
//! - handshake ok → connected
//! - binary message → blob handed to the renderer, draw spawned
//! - transport error or failed handshake → error, then disconnected
//! - peer close or `Connection::close` → disconnected
//!
//! Draws are spawned rather than awaited so the read loop keeps pulling
//! messages while a frame decodes; whatever arrives meanwhile overwrites the
//! pending blob. There is no reconnect, heartbeat, or close-code handling.
//!
//! After a close is requested the peer gets [`CLOSE_GRACE`] to answer the
//! close frame. A peer that never answers is dropped when it runs out, so
//! closing (and therefore reconnecting) is bounded.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::render::{DrawOutcome, Renderer};
use crate::status::{Status, StatusLabel};

/// How long a requested close waits for the peer's close reply.
pub const CLOSE_GRACE: Duration = Duration::from_secs(1);

pub struct Connection {
    url: String,
    close_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Connection {
    /// Start connecting to `url`. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn open(url: String, status: StatusLabel, renderer: Arc<Renderer>) -> Self {
        let (close_tx, close_rx) = oneshot::channel();
        let task = tokio::spawn(run_connection(url.clone(), status, renderer, close_rx));
        Self { url, close_tx: Some(close_tx), task }
    }

    /// Whether the connection task has ended (closed by either side or failed).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Close the socket and wait until the connection task has ended.
    pub async fn close(mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            if close_tx.send(()).is_err() {
                debug!(url = %self.url, "connection already finished");
            }
        }
        if let Err(error) = self.task.await {
            warn!(%error, "connection task failed");
        }
    }
}

async fn run_connection(
    url: String,
    status: StatusLabel,
    renderer: Arc<Renderer>,
    mut close_rx: oneshot::Receiver<()>,
) {
    let connected = tokio::select! {
        result = connect_async(url.as_str()) => result,
        _ = &mut close_rx => {
            info!("ws: closed before the handshake completed");
            status.set(Status::Error);
            status.set(Status::Disconnected);
            return;
        }
    };
    let mut stream = match connected {
        Ok((stream, _response)) => stream,
        Err(error) => {
            warn!(%error, "ws: connect failed");
            status.set(Status::Error);
            status.set(Status::Disconnected);
            return;
        }
    };

    info!("ws: connected");
    status.set(Status::Connected);

    let close_grace = tokio::time::sleep(CLOSE_GRACE);
    tokio::pin!(close_grace);
    let mut close_requested = false;
    loop {
        tokio::select! {
            _ = &mut close_rx, if !close_requested => {
                close_requested = true;
                close_grace.as_mut().reset(Instant::now() + CLOSE_GRACE);
                // Keep reading so the peer's close reply completes the handshake.
                match tokio::time::timeout(CLOSE_GRACE, stream.close(None)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(error)) => {
                        debug!(%error, "ws: close failed");
                        break;
                    }
                    Err(_) => {
                        debug!("ws: close frame not sent in time, dropping socket");
                        break;
                    }
                }
            }
            () = &mut close_grace, if close_requested => {
                debug!("ws: peer did not answer the close, dropping socket");
                break;
            }
            message = stream.next() => match message {
                None => break,
                Some(Ok(Message::Binary(blob))) => {
                    renderer.submit(blob);
                    spawn_draw(Arc::clone(&renderer));
                }
                Some(Ok(Message::Text(text))) => {
                    debug!(len = text.len(), "ws: ignoring text message");
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "ws: close received");
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    if !close_requested {
                        warn!(%error, "ws: transport error");
                        status.set(Status::Error);
                    }
                    break;
                }
            }
        }
    }

    info!("ws: disconnected");
    status.set(Status::Disconnected);
}

fn spawn_draw(renderer: Arc<Renderer>) {
    tokio::spawn(async move {
        match renderer.draw().await {
            Ok(DrawOutcome::Drawn { width, height }) => debug!(width, height, "frame drawn"),
            Ok(outcome) => debug!(?outcome, "draw skipped"),
            Err(error) => warn!(%error, "frame render failed"),
        }
    });
}
