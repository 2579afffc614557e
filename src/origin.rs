//! Page origin: scheme and host the viewer talks to.
//!
//! Plays the role `location` plays for a browser page. The token endpoint is
//! reached over HTTP(S) on the same host, and the stream socket uses `wss`
//! exactly when the origin is secure.

use crate::error::ClientError;

pub const TOKEN_PATH: &str = "/auth/token";
pub const STREAM_PATH: &str = "/stream/ws";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    secure: bool,
    host: String,
}

impl Origin {
    /// Parse `http://host[:port][/...]` or `https://...`.
    ///
    /// Any path after the host is ignored; endpoints are always resolved
    /// against the host root.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] for other schemes or an empty
    /// host.
    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim();
        let (secure, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            (false, rest)
        } else {
            return Err(ClientError::InvalidBaseUrl(base_url.to_owned()));
        };

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_owned()));
        }
        Ok(Self { secure, host: host.to_owned() })
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// `host[:port]`, as `location.host` would report it.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn http_url(&self, path: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}{path}", self.host)
    }

    /// Stream socket URL with `token` percent-encoded into the query.
    #[must_use]
    pub fn stream_url(&self, token: &str) -> String {
        let proto = if self.secure { "wss" } else { "ws" };
        format!("{proto}://{}{STREAM_PATH}?token={}", self.host, urlencoding::encode(token))
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod tests;
