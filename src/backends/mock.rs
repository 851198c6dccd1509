//! In-memory binding for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use task_api::{ApiError, AuthResponse, Credentials, Registration, StatusCode};

use crate::backend::AuthBackend;

#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    name: String,
    user_id: String,
}

#[derive(Debug, Default)]
struct MockState {
    users: HashMap<String, MockUser>,
    next_user_id: u64,
    login_calls: usize,
    register_calls: usize,
    logout_calls: usize,
    fail_logout: bool,
}

/// Deterministic [`AuthBackend`] backed by an in-memory user table.
///
/// Accounts registered through [`AuthBackend::register`] or seeded with
/// [`MockAuthBackend::with_user`] can then log in. Responses mimic the flat
/// token-bearing shape of the real backend, with tokens derived from the
/// user id so assertions stay stable across runs.
#[derive(Debug, Default)]
pub struct MockAuthBackend {
    state: Mutex<MockState>,
}

impl MockAuthBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account without going through registration.
    #[must_use]
    pub fn with_user(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        {
            let mut state = self.lock();
            let user_id = format!("user-{}", state.next_user_id);
            state.next_user_id += 1;
            state.users.insert(
                email.into().trim().to_ascii_lowercase(),
                MockUser {
                    password: password.into(),
                    name: name.into(),
                    user_id,
                },
            );
        }
        self
    }

    /// Make subsequent logout calls fail with a server error.
    pub fn fail_logout(&self, fail: bool) {
        self.lock().fail_logout = fail;
    }

    /// Backend calls observed so far, as `(login, register, logout)`.
    pub fn call_counts(&self) -> (usize, usize, usize) {
        let state = self.lock();
        (state.login_calls, state.register_calls, state.logout_calls)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn response_for(email: &str, user: &MockUser) -> AuthResponse {
    AuthResponse {
        access_token: Some(format!("mock-token-{}", user.user_id)),
        token_type: Some("bearer".to_string()),
        user_id: Some(user.user_id.clone()),
        email: Some(email.to_string()),
        name: Some(user.name.clone()),
        user: None,
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let mut state = self.lock();
        state.login_calls += 1;
        let email = credentials.email.trim().to_ascii_lowercase();
        match state.users.get(&email) {
            Some(user) if user.password == credentials.password => {
                Ok(response_for(&email, user))
            }
            _ => Err(ApiError::Status(
                StatusCode::UNAUTHORIZED,
                "Incorrect email or password".to_string(),
            )),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let mut state = self.lock();
        state.register_calls += 1;
        let email = registration.email.trim().to_ascii_lowercase();
        if state.users.contains_key(&email) {
            return Err(ApiError::Status(
                StatusCode::BAD_REQUEST,
                "Email already registered".to_string(),
            ));
        }
        let user_id = format!("user-{}", state.next_user_id);
        state.next_user_id += 1;
        let user = MockUser {
            password: registration.password.clone(),
            name: registration.name.clone(),
            user_id,
        };
        let response = response_for(&email, &user);
        state.users.insert(email, user);
        Ok(response)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.logout_calls += 1;
        if state.fail_logout {
            return Err(ApiError::Status(
                StatusCode::INTERNAL_SERVER_ERROR,
                "logout unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_user_can_log_in() {
        let backend = MockAuthBackend::new().with_user("a@b.co", "hunter22", "Ada");
        let response = backend
            .login(&Credentials::new("A@B.CO", "hunter22"))
            .await
            .expect("login succeeds");
        assert_eq!(response.resolved_user_id().as_deref(), Some("user-0"));
        assert_eq!(response.token(), Some("mock-token-user-0"));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let backend = MockAuthBackend::new().with_user("a@b.co", "hunter22", "Ada");
        let err = backend
            .login(&Credentials::new("a@b.co", "nope"))
            .await
            .expect_err("login fails");
        assert!(matches!(err, ApiError::Status(StatusCode::UNAUTHORIZED, _)));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let backend = MockAuthBackend::new().with_user("a@b.co", "hunter22", "Ada");
        let err = backend
            .register(&Registration {
                email: "a@b.co".to_string(),
                password: "password1".to_string(),
                name: "Ada".to_string(),
            })
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(err, ApiError::Status(StatusCode::BAD_REQUEST, _)));
        assert_eq!(backend.call_counts(), (0, 1, 0));
    }
}
