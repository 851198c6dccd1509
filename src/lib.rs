//! Client-side core for a personal task tracker.
//!
//! ## Components
//!
//! - [`auth::AuthService`]: login, register, and logout against the backend,
//!   normalizing its response shapes into the persisted session record.
//! - [`guard::RouteGuard`]: the checking/authenticated/unauthenticated state
//!   machine that decides redirects between public and protected views.
//! - `session_store` / `task_api` (workspace crates): the persisted session
//!   cache and the credentialed REST client.
//!
//! ## Backend bootstrap
//!
//! `taskdeck` requires explicit backend selection:
//!
//! - `TASKDECK_BACKEND=mock` for deterministic local tests
//! - `TASKDECK_BACKEND=http` for the real REST backend
//!
//! When `TASKDECK_BACKEND=http`, `TASKDECK_API_BASE_URL` points at the
//! backend (default `http://localhost:8000`). Sessions persist to
//! `TASKDECK_SESSION_PATH` when set, else `.taskdeck/session.json` under the
//! caller-supplied root. `TASKDECK_SESSION_TTL_HOURS` overrides the default
//! 24-hour session lifetime; `TASKDECK_TIMEOUT_SEC` bounds each request.
//!
//! Contract notes:
//! - The session store is the only owner of persisted credential state; the
//!   auth service and API client hold shared read/store/clear handles.
//! - Every request re-reads the store, so an expired session never rides
//!   along as a stale bearer token.

pub mod auth;
pub mod backend;
pub mod backends;
pub mod config;
pub mod guard;
pub mod logging;
pub mod stats;

pub use auth::{AuthOutcome, AuthService, DEFAULT_SESSION_TTL};
pub use backend::AuthBackend;
pub use config::{BackendKind, EnvConfig};
pub use guard::{AuthState, Route, RouteGuard};
pub use stats::TaskStats;
