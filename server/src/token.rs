//! HS256 JSON Web Tokens for stream access.
//!
//! Tokens carry `sub` (the requested user id), `iat`, and `exp`. They are
//! stateless: nothing is stored server-side and there is no revocation, so a
//! token stays valid until `exp` regardless of how often it is used.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not three dot-separated segments")]
    Malformed,
    #[error("token segment is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported token algorithm {0:?}")]
    Algorithm(String),
    #[error("token signature mismatch")]
    Signature,
    #[error("token expired")]
    Expired,
    #[error("invalid signing key")]
    Key,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: time::Duration,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        Self { secret: secret.as_bytes().to_vec(), ttl: time::Duration::minutes(expire_minutes) }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::Key)
    }

    /// Issue a token for `user_id`, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Only fails if the claims cannot be serialized or the key is rejected.
    pub fn issue(&self, user_id: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// Same as [`TokenSigner::issue`].
    pub fn issue_at(&self, user_id: &str, now: i64) -> Result<IssuedToken, TokenError> {
        let expires_at = now.saturating_add(self.ttl.whole_seconds());
        let header = Header { alg: ALGORITHM.to_owned(), typ: "JWT".to_owned() };
        let claims = Claims { sub: user_id.to_owned(), iat: now, exp: expires_at };

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken { token: format!("{signing_input}.{signature}"), expires_at })
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Any [`TokenError`] other than `Key` describes why the token was refused.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Verify as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// Same as [`TokenSigner::verify`].
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&URL_SAFE_NO_PAD.decode(signature)?)
            .map_err(|_| TokenError::Signature)?;

        let header: Header = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header)?)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Algorithm(header.alg));
        }

        let claims: Claims = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload)?)?;
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
