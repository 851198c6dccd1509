use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use session_store::SessionStore;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{parse_error_message, ApiError};
use crate::headers::build_headers;
use crate::payload::{
    AuthResponse, Credentials, Registration, Task, TaskCompletion, TaskDraft, TaskUpdate,
};
use crate::url::{
    login_url, logout_url, register_url, task_complete_url, task_url, tasks_url,
};

/// REST client for the task backend.
///
/// Holds a shared handle to the session store and re-reads it for every
/// request, so credential attachment always reflects current (non-expired)
/// session state. Cookies are kept alongside bearer tokens.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: Client,
    config: ApiConfig,
    session: Arc<SessionStore>,
}

impl TaskApiClient {
    pub fn new(config: ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::from)?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Headers for the next request, with the bearer credential resolved from
    /// storage at call time rather than from any cached copy.
    pub fn request_headers(&self) -> Result<HeaderMap, ApiError> {
        let credential = self.current_credential();
        let headers = build_headers(&self.config, credential.as_deref());
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| ApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    ApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<RequestBuilder, ApiError> {
        let headers = self.request_headers()?;
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request)
    }

    // Auth endpoints. These are not user-scoped: they go out with whatever
    // credential (or none) is currently stored.

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.execute_expecting(Method::POST, login_url(&self.config.base_url), Some(credentials))
            .await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.execute_expecting(
            Method::POST,
            register_url(&self.config.base_url),
            Some(registration),
        )
        .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = logout_url(&self.config.base_url);
        let request = self.build_request::<()>(Method::POST, &url, None)?;
        debug!(%url, "sending logout request");
        let response = request.send().await.map_err(ApiError::from)?;
        check_status(response).await?;
        Ok(())
    }

    // Task endpoints. A missing `user_id` resolves from the current session
    // and fails fast, before any network call, when no session exists.

    pub async fn list_tasks(&self, user_id: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = tasks_url(&self.config.base_url, &user_id);
        self.execute_expecting::<(), Vec<Task>>(Method::GET, url, None)
            .await
    }

    pub async fn create_task(
        &self,
        user_id: Option<&str>,
        draft: &TaskDraft,
    ) -> Result<Task, ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = tasks_url(&self.config.base_url, &user_id);
        self.execute_expecting(Method::POST, url, Some(draft)).await
    }

    pub async fn get_task(&self, user_id: Option<&str>, task_id: i64) -> Result<Task, ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = task_url(&self.config.base_url, &user_id, task_id);
        self.execute_expecting::<(), Task>(Method::GET, url, None)
            .await
    }

    pub async fn update_task(
        &self,
        user_id: Option<&str>,
        task_id: i64,
        update: &TaskUpdate,
    ) -> Result<Task, ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = task_url(&self.config.base_url, &user_id, task_id);
        self.execute_expecting(Method::PUT, url, Some(update)).await
    }

    pub async fn delete_task(&self, user_id: Option<&str>, task_id: i64) -> Result<(), ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = task_url(&self.config.base_url, &user_id, task_id);
        let request = self.build_request::<()>(Method::DELETE, &url, None)?;
        debug!(%url, "sending delete request");
        let response = request.send().await.map_err(ApiError::from)?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn set_task_completion(
        &self,
        user_id: Option<&str>,
        task_id: i64,
        completed: bool,
    ) -> Result<Task, ApiError> {
        let user_id = self.resolve_user_id(user_id)?;
        let url = task_complete_url(&self.config.base_url, &user_id, task_id);
        self.execute_expecting(Method::PATCH, url, Some(&TaskCompletion { completed }))
            .await
    }

    fn current_credential(&self) -> Option<String> {
        self.session
            .load()
            .map(|record| record.credential.trim().to_owned())
            .filter(|credential| !credential.is_empty())
    }

    fn resolve_user_id(&self, explicit: Option<&str>) -> Result<String, ApiError> {
        if let Some(user_id) = explicit.map(str::trim).filter(|value| !value.is_empty()) {
            return Ok(user_id.to_owned());
        }
        self.session
            .load()
            .map(|record| record.user.id)
            .ok_or(ApiError::Unauthenticated)
    }

    /// Sends a request and parses the body; a 204 yields `None`.
    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError> {
        let request = self.build_request(method.clone(), &url, body)?;
        debug!(%method, %url, "sending backend request");
        let response = request.send().await.map_err(ApiError::from)?;
        let response = check_status(response).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let parsed = response.json::<T>().await.map_err(ApiError::from)?;
        Ok(Some(parsed))
    }

    async fn execute_expecting<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.execute(method, url, body).await?.ok_or_else(|| {
            ApiError::Status(
                StatusCode::NO_CONTENT,
                "expected a response body".to_owned(),
            )
        })
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|_| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    Err(ApiError::Status(status, parse_error_message(status, &body)))
}
