use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;
use serde_json::Value;

#[derive(Debug)]
pub enum ApiError {
    /// A user-scoped operation was attempted with no active session. Raised
    /// before any network call.
    Unauthenticated,
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
}

impl ApiError {
    /// The message a page or component should render for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "You must be signed in to do that".to_owned(),
            Self::Status(_, message) => message.clone(),
            Self::Request(error) => format!("Could not reach the server: {error}"),
            Self::InvalidHeader(message) => message.clone(),
            Self::Serde(error) => format!("Unexpected response from the server: {error}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "no active session for user-scoped request"),
            Self::InvalidHeader(message) => write!(f, "invalid request header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for ApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    fn best_message(&self) -> Option<String> {
        if let Some(detail) = &self.detail {
            if let Some(message) = detail_message(detail) {
                return Some(message);
            }
        }
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }
}

/// Extract a human-readable message from a non-2xx response body.
///
/// The backend reports errors as `{"detail": ...}` or `{"message": ...}`;
/// `detail` may also be a validation-error array whose elements carry a `msg`
/// field. Anything unparseable falls back to the raw body, then to the status
/// line.
#[must_use]
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = payload.best_message() {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
