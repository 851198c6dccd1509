//! Transport-only REST client for the task backend.
//!
//! This crate owns request building, credential attachment, response parsing,
//! and error normalization for the backend's auth and task endpoints. It
//! intentionally contains no session-construction policy and no UI coupling:
//! the credential for each outgoing request is re-read from the session store
//! immediately before sending, so a request issued after expiry never carries
//! a stale token.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod token;
pub mod url;

pub use client::TaskApiClient;
pub use reqwest::StatusCode;
pub use config::ApiConfig;
pub use error::{parse_error_message, ApiError};
pub use payload::{AuthResponse, Credentials, Registration, Task, TaskDraft, TaskUpdate};
pub use token::user_id_from_token;
pub use url::normalize_base_url;
