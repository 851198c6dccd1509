//! Authentication backend seam.

use async_trait::async_trait;
use task_api::{ApiError, AuthResponse, Credentials, Registration};

/// The authentication operations the app needs from a backend.
///
/// The HTTP binding talks to the real REST backend; the mock binding serves
/// deterministic responses for tests. [`crate::AuthService`] only depends on
/// this trait.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;
}
