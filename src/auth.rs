//! Token requester.
//!
//! One POST per call, no retry. The response status is not inspected: any
//! JSON body is accepted and a missing or falsy `access_token` (absent,
//! `null`, `false`, `0`, `""`, or a body that is not an object) yields an
//! empty token. A body that is not JSON at all is an error.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::origin::{Origin, TOKEN_PATH};

/// Identifier sent when the user-id field is left empty.
pub const DEFAULT_USER_ID: &str = "frontend-dev";

#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub user_id: &'a str,
}

/// The id to submit for a user-id field value.
///
/// Only an empty field falls back to [`DEFAULT_USER_ID`]; whitespace is sent
/// as typed.
#[must_use]
pub fn effective_user_id(field: &str) -> &str {
    if field.is_empty() { DEFAULT_USER_ID } else { field }
}

/// `POST {origin}/auth/token` and return the issued token, or `""` if the
/// response carries none.
///
/// # Errors
///
/// Returns [`ClientError::Http`] on transport failure or when the body is not
/// a JSON object this client can read.
pub async fn request_token(http: &reqwest::Client, origin: &Origin, user_id: &str) -> Result<String, ClientError> {
    let url = origin.http_url(TOKEN_PATH);
    tracing::debug!(%url, user_id, "requesting token");

    let response = http.post(url).json(&TokenRequest { user_id }).send().await?;
    let body: Value = response.json().await?;
    Ok(token_from_body(&body))
}

/// Field value for the token input: strings as-is, other truthy scalars in
/// their text form, falsy or missing values as `""`.
#[must_use]
pub fn token_from_body(body: &Value) -> String {
    match body.get("access_token") {
        None | Some(Value::Null | Value::Bool(false)) => String::new(),
        Some(Value::String(token)) => token.clone(),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
