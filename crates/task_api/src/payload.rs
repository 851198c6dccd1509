use serde::{Deserialize, Serialize};

use crate::token::user_id_from_token;

/// Task resource as returned by the backend task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST .../tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Body for `PUT .../tasks/{id}`. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Body for `PATCH .../tasks/{id}/complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub completed: bool,
}

/// Body for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body for `POST /api/v1/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Success payload for the auth endpoints.
///
/// Deployed backend revisions disagree on field names (`access_token` vs
/// `token`, `user_id` vs `id`, flat vs nested `user`); this type accepts all
/// observed shapes so normalization happens exactly once, at the auth-service
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, alias = "id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub user: Option<AuthResponseUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponseUser {
    #[serde(default, alias = "user_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
}

impl AuthResponse {
    /// The bearer credential, when the backend returned one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        nonempty(self.access_token.as_deref())
    }

    /// The user id, checking flat fields, the nested user object, and finally
    /// the token's identity claim.
    #[must_use]
    pub fn resolved_user_id(&self) -> Option<String> {
        if let Some(id) = nonempty(self.user_id.as_deref()) {
            return Some(id.to_owned());
        }
        if let Some(id) = self
            .user
            .as_ref()
            .and_then(|user| nonempty(user.id.as_deref()))
        {
            return Some(id.to_owned());
        }
        self.token().and_then(user_id_from_token)
    }

    #[must_use]
    pub fn resolved_email(&self) -> Option<&str> {
        nonempty(self.email.as_deref())
            .or_else(|| self.user.as_ref().and_then(|user| nonempty(user.email.as_deref())))
    }

    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        nonempty(self.name.as_deref())
            .or_else(|| self.user.as_ref().and_then(|user| nonempty(user.name.as_deref())))
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
