use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use session_store::{SessionRecord, SessionStore, SessionUser};
use task_api::{ApiConfig, ApiError, Credentials, TaskApiClient};
use tempfile::TempDir;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn empty_store() -> (TempDir, Arc<SessionStore>) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = Arc::new(SessionStore::new(dir.path().join("session.json")));
    (dir, store)
}

fn store_with_session(credential: &str, secs_from_now: i64) -> (TempDir, Arc<SessionStore>) {
    let (dir, store) = empty_store();
    let offset = Duration::from_secs(secs_from_now.unsigned_abs());
    let instant = if secs_from_now < 0 {
        OffsetDateTime::now_utc() - offset
    } else {
        OffsetDateTime::now_utc() + offset
    };
    let expires_at = instant.format(&Rfc3339).expect("format expiry");

    let record = SessionRecord::v1(SessionUser::new("u1", "a@b.com"), credential, expires_at);
    assert!(store.save(&record));
    (dir, store)
}

fn client_with(store: Arc<SessionStore>) -> TaskApiClient {
    TaskApiClient::new(ApiConfig::new("https://tasks.example.com"), store).expect("client")
}

#[test]
fn login_request_targets_auth_endpoint() {
    let (_dir, store) = empty_store();
    let client = client_with(store);

    let request = client
        .build_request(
            reqwest::Method::POST,
            &task_api::url::login_url(client.config().base_url.as_str()),
            Some(&Credentials::new("a@b.com", "pw")),
        )
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        "https://tasks.example.com/api/v1/auth/login"
    );
    assert_eq!(request.method(), "POST");
}

#[test]
fn active_session_credential_is_attached() {
    let (_dir, store) = store_with_session("tok-xyz", 3600);
    let client = client_with(store);

    let headers = client.request_headers().expect("headers");
    assert_eq!(
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
        Some("Bearer tok-xyz")
    );
}

#[test]
fn missing_session_sends_unauthenticated() {
    let (_dir, store) = empty_store();
    let client = client_with(store);

    let headers = client.request_headers().expect("headers");
    assert!(headers.get("authorization").is_none());
}

#[test]
fn expired_session_never_yields_a_stale_token() {
    let (_dir, store) = store_with_session("tok-old", -1);
    let client = client_with(store);

    let headers = client.request_headers().expect("headers");
    assert!(headers.get("authorization").is_none());
}

#[tokio::test]
async fn task_operation_without_session_fails_fast() {
    let (_dir, store) = empty_store();
    let client = client_with(store);

    let error = client
        .list_tasks(None)
        .await
        .expect_err("no session must fail");
    assert!(matches!(error, ApiError::Unauthenticated));
}

#[tokio::test]
async fn network_failure_surfaces_as_request_error() {
    // Bind then drop a listener so the port is known-refused.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);
        port
    };

    let (_dir, store) = empty_store();
    let client = TaskApiClient::new(ApiConfig::new(format!("http://127.0.0.1:{port}")), store)
        .expect("client");

    let error = client
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .expect_err("refused connection must fail");
    assert!(matches!(error, ApiError::Request(_)));
}
