//! REST binding for the auth backend seam.

use std::sync::Arc;

use async_trait::async_trait;
use task_api::{ApiError, AuthResponse, Credentials, Registration, TaskApiClient};

use crate::backend::AuthBackend;

/// Delegates every auth operation to the shared [`TaskApiClient`].
///
/// Sharing the client keeps auth and task requests on one connection pool
/// and one cookie jar, so a cookie set at login rides along on task calls.
pub struct HttpAuthBackend {
    client: Arc<TaskApiClient>,
}

impl HttpAuthBackend {
    #[must_use]
    pub fn new(client: Arc<TaskApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.client.login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.client.register(registration).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.client.logout().await
    }
}
