//! Bindings for the [`crate::AuthBackend`] seam.

pub mod http;
pub mod mock;

pub use http::HttpAuthBackend;
pub use mock::MockAuthBackend;
