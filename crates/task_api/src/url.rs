/// Default base URL for the task backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// API version prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Normalize a backend base URL.
///
/// Normalization rules:
/// 1) empty input falls back to the default base URL
/// 2) trailing slashes are trimmed
/// 3) a base already ending in `/api/v1` has the prefix stripped so endpoint
///    builders never double it
#[must_use]
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if let Some(stripped) = trimmed.strip_suffix(API_PREFIX) {
        return stripped.trim_end_matches('/').to_string();
    }
    trimmed.to_string()
}

#[must_use]
pub fn login_url(base: &str) -> String {
    format!("{}{}/auth/login", normalize_base_url(base), API_PREFIX)
}

#[must_use]
pub fn register_url(base: &str) -> String {
    format!("{}{}/auth/register", normalize_base_url(base), API_PREFIX)
}

#[must_use]
pub fn logout_url(base: &str) -> String {
    format!("{}{}/auth/logout", normalize_base_url(base), API_PREFIX)
}

#[must_use]
pub fn tasks_url(base: &str, user_id: &str) -> String {
    format!("{}{}/tasks/{user_id}/tasks", normalize_base_url(base), API_PREFIX)
}

#[must_use]
pub fn task_url(base: &str, user_id: &str, task_id: i64) -> String {
    format!("{}/{task_id}", tasks_url(base, user_id))
}

#[must_use]
pub fn task_complete_url(base: &str, user_id: &str, task_id: i64) -> String {
    format!("{}/{task_id}/complete", tasks_url(base, user_id))
}
