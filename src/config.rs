//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use task_api::url::DEFAULT_API_BASE_URL;
use task_api::{normalize_base_url, ApiConfig};

/// Which [`crate::AuthBackend`] binding to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Mock,
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub backend: BackendKind,
    pub api_base_url: String,
    pub session_path: Option<PathBuf>,
    pub session_ttl_hours: Option<u64>,
    pub request_timeout: Option<Duration>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            backend: env_backend("TASKDECK_BACKEND"),
            api_base_url: normalize_base_url(
                &env_string_opt("TASKDECK_API_BASE_URL").unwrap_or_default(),
            ),
            session_path: env_string_opt("TASKDECK_SESSION_PATH").map(PathBuf::from),
            session_ttl_hours: env_u64_opt("TASKDECK_SESSION_TTL_HOURS"),
            request_timeout: env_u64_opt("TASKDECK_TIMEOUT_SEC").map(Duration::from_secs),
        }
    }

    /// Session lifetime for new sign-ins.
    #[must_use]
    pub fn session_ttl(&self) -> time::Duration {
        match self.session_ttl_hours {
            Some(hours) => time::Duration::hours(hours as i64),
            None => crate::auth::DEFAULT_SESSION_TTL,
        }
    }

    /// Transport configuration derived from this environment.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(&self.api_base_url);
        if let Some(timeout) = self.request_timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_path: None,
            session_ttl_hours: None,
            request_timeout: None,
        }
    }
}

fn env_backend(key: &str) -> BackendKind {
    match env::var(key).as_deref() {
        Ok("mock") => BackendKind::Mock,
        _ => BackendKind::Http,
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_u64_opt(key: &str) -> Option<u64> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}
