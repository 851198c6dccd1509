//! Persistent single-user session cache.
//!
//! This crate owns the one `SessionRecord` a signed-in client keeps on disk:
//! a user identity, an opaque credential, and an absolute expiry timestamp.
//! Validation and purge-on-invalid live inside [`SessionStore::load`] so
//! every caller observes the same never-silently-stale view of the session.

mod error;
mod paths;
mod schema;
mod store;

pub use error::SessionStoreError;
pub use paths::{default_session_path, session_dir, SESSION_DIR, SESSION_FILE_NAME};
pub use schema::{SessionRecord, SessionUser, SESSION_SCHEMA_VERSION};
pub use store::SessionStore;
