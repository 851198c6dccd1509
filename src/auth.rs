//! Session lifecycle orchestration.
//!
//! The auth service sits between UI actions and the [`AuthBackend`],
//! translating backend responses into the persisted session record and
//! backend errors into user-facing messages. All session writes happen here;
//! reads happen wherever a [`session_store::SessionStore`] handle lives.

use std::sync::Arc;

use session_store::{SessionRecord, SessionStore, SessionUser};
use task_api::{AuthResponse, Credentials, Registration};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::backend::AuthBackend;

/// Sessions live for a day unless configured otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

const MIN_PASSWORD_LEN: usize = 8;

/// Result of a login or registration attempt.
///
/// Auth failures are expected outcomes, not faults, so they surface as a
/// message for the UI rather than an error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Drives sign-in, sign-up, and sign-out against a pluggable backend.
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    session: Arc<SessionStore>,
    ttl: Duration,
}

impl AuthService {
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, session: Arc<SessionStore>) -> Self {
        Self {
            backend,
            session,
            ttl: DEFAULT_SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Authenticate and persist a session on success.
    ///
    /// Blank inputs are rejected locally without a backend call. A success
    /// response that carries no resolvable user id is treated as a failed
    /// login, since a session without an identity cannot scope task requests.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::failed("Email and password are required.");
        }

        let credentials = Credentials::new(email, password);
        let response = match self.backend.login(&credentials).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "login rejected by backend");
                return AuthOutcome::failed(err.user_message());
            }
        };

        match self.persist_session(email, &response) {
            Some(user_id) => {
                info!(user_id = %user_id, "signed in");
                AuthOutcome::ok()
            }
            None => AuthOutcome::failed("Sign-in response was missing account details."),
        }
    }

    /// Create an account and, when the response identifies the new user,
    /// persist a session so registration flows straight into the app.
    ///
    /// A success response without a usable identity still counts as a
    /// successful registration; the caller signs in separately.
    pub async fn register(&self, email: &str, password: &str, name: Option<&str>) -> AuthOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::failed("Email and password are required.");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return AuthOutcome::failed("Password must be at least 8 characters long.");
        }

        let name = match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => email.split('@').next().unwrap_or(email).to_string(),
        };
        let registration = Registration {
            email: email.to_string(),
            password: password.to_string(),
            name,
        };

        let response = match self.backend.register(&registration).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "registration rejected by backend");
                return AuthOutcome::failed(rewrite_register_error(&err.user_message()));
            }
        };

        if let Some(user_id) = self.persist_session(email, &response) {
            info!(user_id = %user_id, "registered and signed in");
        } else {
            info!("registered; response carried no session identity");
        }
        AuthOutcome::ok()
    }

    /// Sign out on the backend, then drop the local session unconditionally.
    ///
    /// Returns whether the backend acknowledged the logout. The local
    /// session is cleared either way, so a failed call still signs the user
    /// out of this client.
    pub async fn logout(&self) -> bool {
        let acknowledged = match self.backend.logout().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "backend logout failed; clearing local session anyway");
                false
            }
        };
        self.session.clear();
        acknowledged
    }

    /// The currently persisted session, if one exists and is still valid.
    #[must_use]
    pub fn get_session(&self) -> Option<SessionRecord> {
        self.session.load()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    #[must_use]
    pub fn current_user_id(&self) -> Option<String> {
        self.get_session().map(|record| record.user.id)
    }

    /// Build and save a session from an auth response. Returns the resolved
    /// user id when one was available, `None` otherwise.
    fn persist_session(&self, fallback_email: &str, response: &AuthResponse) -> Option<String> {
        let user_id = response.resolved_user_id()?;
        let email = response.resolved_email().unwrap_or(fallback_email);
        let mut user = SessionUser::new(user_id.clone(), email);
        if let Some(name) = response.resolved_name() {
            user = user.with_name(name);
        }

        let credential = response.token().unwrap_or_default();
        let expires_at = OffsetDateTime::now_utc() + self.ttl;
        match SessionRecord::v1_expiring(user, credential, expires_at) {
            Ok(record) => {
                // A failed save is logged by the store; the in-flight sign-in
                // still succeeded, the session just will not survive restart.
                self.session.save(&record);
                Some(user_id)
            }
            Err(err) => {
                warn!(error = %err, "could not encode session expiry; session not persisted");
                Some(user_id)
            }
        }
    }
}

/// The backend leaks a bcrypt implementation detail when passwords exceed its
/// 72-byte input limit. Replace it with something a person can act on.
fn rewrite_register_error(message: &str) -> String {
    if message.contains("72 bytes") {
        "Password validation failed. Please try a different password.".to_string()
    } else {
        message.to_string()
    }
}
