//! Status label shared by the auth and stream flows.
//!
//! The label always shows the last lifecycle event of either flow. The
//! current value is kept in a `watch` channel; every change is also
//! published on a `broadcast` channel so observers see transitions that
//! happen back to back (an error immediately followed by a close).

use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::debug;

/// Prefix the label text is rendered with.
pub const STATUS_PREFIX: &str = "Статус: ";

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    FetchingToken,
    TokenReceived,
    NoToken,
    Connected,
    Disconnected,
    Error,
}

impl Status {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FetchingToken => "получение JWT...",
            Self::TokenReceived => "JWT получен",
            Self::NoToken => "нет токена",
            Self::Connected => "подключено",
            Self::Disconnected => "отключено",
            Self::Error => "ошибка",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone)]
pub struct StatusLabel {
    current: Arc<watch::Sender<Option<Status>>>,
    events: broadcast::Sender<Status>,
}

impl Default for StatusLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLabel {
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { current: Arc::new(current), events }
    }

    pub fn set(&self, status: Status) {
        debug!(status = status.label(), "status changed");
        self.current.send_replace(Some(status));
        if self.events.receiver_count() > 0 {
            // Lagging observers drop old events; the label itself is unaffected.
            if self.events.send(status).is_err() {
                debug!("status observers went away");
            }
        }
    }

    /// Last status set, or `None` before either flow has run.
    #[must_use]
    pub fn current(&self) -> Option<Status> {
        *self.current.borrow()
    }

    /// Rendered label text; empty until the first status is set.
    #[must_use]
    pub fn text(&self) -> String {
        self.current().map_or_else(String::new, |status| format!("{STATUS_PREFIX}{status}"))
    }

    /// Observe every status change from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Status> {
        self.events.subscribe()
    }

    /// Watch the current value; useful for waiting on a particular state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Status>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
