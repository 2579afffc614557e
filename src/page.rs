//! Page state: the fields, the status label, the single connection, and the
//! renderer, composed the way the viewer page composes them.
//!
//! The form fields and label are plain shared state. The connection slot sits
//! behind an async mutex so two overlapping `connect` calls cannot both open
//! a socket: the second waits for the first to finish replacing the slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

use crate::auth;
use crate::connector::Connection;
use crate::error::ClientError;
use crate::origin::Origin;
use crate::render::Renderer;
use crate::status::{Status, StatusLabel};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Fields {
    user_id: String,
    token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A socket is being opened; lifecycle events follow on the status label.
    Opening,
    /// The token field was blank; nothing was opened.
    NoToken,
}

pub struct Page {
    origin: Origin,
    http: reqwest::Client,
    status: StatusLabel,
    fields: Mutex<Fields>,
    connection: AsyncMutex<Option<Connection>>,
    renderer: Arc<Renderer>,
}

impl Page {
    #[must_use]
    pub fn new(origin: Origin, renderer: Arc<Renderer>) -> Self {
        Self::with_http(origin, renderer, reqwest::Client::new())
    }

    #[must_use]
    pub fn with_http(origin: Origin, renderer: Arc<Renderer>, http: reqwest::Client) -> Self {
        Self {
            origin,
            http,
            status: StatusLabel::new(),
            fields: Mutex::new(Fields::default()),
            connection: AsyncMutex::new(None),
            renderer,
        }
    }

    fn fields(&self) -> MutexGuard<'_, Fields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn status(&self) -> &StatusLabel {
        &self.status
    }

    #[must_use]
    pub fn renderer(&self) -> &Arc<Renderer> {
        &self.renderer
    }

    #[must_use]
    pub fn user_id(&self) -> String {
        self.fields().user_id.clone()
    }

    pub fn set_user_id(&self, user_id: impl Into<String>) {
        self.fields().user_id = user_id.into();
    }

    #[must_use]
    pub fn token(&self) -> String {
        self.fields().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.fields().token = token.into();
    }

    /// Request a token for the user-id field and store it in the token field.
    ///
    /// Returns the stored token (possibly empty).
    ///
    /// # Errors
    ///
    /// Propagates transport and body errors from [`auth::request_token`]. The
    /// token field is left untouched and the label stays at "fetching".
    pub async fn submit_auth(&self) -> Result<String, ClientError> {
        self.status.set(Status::FetchingToken);

        let user_id = self.user_id();
        let token = auth::request_token(&self.http, &self.origin, auth::effective_user_id(&user_id)).await?;

        self.set_token(token.clone());
        self.status.set(Status::TokenReceived);
        Ok(token)
    }

    /// Replace the current connection with a new one for the token field.
    ///
    /// Any existing connection is closed, and its task has ended, before the
    /// token is checked, so at most one socket is ever live.
    pub async fn connect(&self) -> ConnectOutcome {
        let mut slot = self.connection.lock().await;
        if let Some(previous) = slot.take() {
            previous.close().await;
        }

        let token = self.token().trim().to_owned();
        if token.is_empty() {
            self.status.set(Status::NoToken);
            return ConnectOutcome::NoToken;
        }

        let url = self.origin.stream_url(&token);
        tracing::info!(host = self.origin.host(), "ws: connecting");
        *slot = Some(Connection::open(url, self.status.clone(), Arc::clone(&self.renderer)));
        ConnectOutcome::Opening
    }

    /// Close the current connection, if any, and wait for it to end.
    pub async fn disconnect(&self) {
        let previous = self.connection.lock().await.take();
        if let Some(previous) = previous {
            previous.close().await;
        }
    }

    /// Whether a connection task exists and has not ended.
    pub async fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .await
            .as_ref()
            .is_some_and(|connection| !connection.is_finished())
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
