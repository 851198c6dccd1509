use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Current persisted schema version. Records with any other version are
/// treated as invalid and purged on load.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// Identity portion of a persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SessionUser {
    /// Creates a user identity, lower-casing the email for stable comparison.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into().trim().to_ascii_lowercase(),
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The single persisted record for a signed-in user.
///
/// `credential` may be empty when the backend relies on a cookie instead of a
/// bearer token. `expires_at` is an absolute RFC3339 timestamp; validity is
/// always re-checked against wall-clock time on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionRecord {
    pub version: u32,
    pub user: SessionUser,
    pub credential: String,
    pub expires_at: String,
}

impl SessionRecord {
    #[must_use]
    pub fn v1(user: SessionUser, credential: impl Into<String>, expires_at: impl Into<String>) -> Self {
        Self {
            version: SESSION_SCHEMA_VERSION,
            user,
            credential: credential.into(),
            expires_at: expires_at.into(),
        }
    }

    /// Builds a v1 record whose expiry is the given instant, RFC3339-encoded.
    pub fn v1_expiring(
        user: SessionUser,
        credential: impl Into<String>,
        expires_at: OffsetDateTime,
    ) -> Result<Self, crate::error::SessionStoreError> {
        let expires_at = expires_at
            .format(&Rfc3339)
            .map_err(crate::error::SessionStoreError::ClockFormat)?;
        Ok(Self::v1(user, credential, expires_at))
    }

    /// Parses `expires_at`, or `None` when the stored value is not RFC3339.
    #[must_use]
    pub fn expires_at_parsed(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.expires_at, &Rfc3339).ok()
    }

    /// A record is valid iff its version is supported, its user id is
    /// non-empty, and `now` is strictly before its parseable expiry.
    #[must_use]
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        if self.version != SESSION_SCHEMA_VERSION || self.user.id.trim().is_empty() {
            return false;
        }
        match self.expires_at_parsed() {
            Some(expires_at) => now < expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionRecord, SessionUser};
    use time::macros::datetime;

    fn record(expires_at: &str) -> SessionRecord {
        SessionRecord::v1(
            SessionUser::new("u1", "A@B.com").with_name("Ada"),
            "tok",
            expires_at,
        )
    }

    #[test]
    fn email_is_lower_cased_on_construction() {
        let user = SessionUser::new("u1", "  Someone@Example.COM ");
        assert_eq!(user.email, "someone@example.com");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = record("2026-01-01T00:00:00Z");
        let json = serde_json::to_string(&record).expect("serialize record");
        let parsed: SessionRecord = serde_json::from_str(&json).expect("parse record");
        assert_eq!(parsed, record);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{"version":1,"user":{"id":"u1","email":"a@b.com"},"credential":"tok","expires_at":"2026-01-01T00:00:00Z","extra":true}"#;
        assert!(serde_json::from_str::<SessionRecord>(json).is_err());
    }

    #[test]
    fn validity_respects_expiry_boundary() {
        let record = record("2026-01-01T00:00:00Z");
        assert!(record.is_valid_at(datetime!(2025-12-31 23:59:59 UTC)));
        assert!(!record.is_valid_at(datetime!(2026-01-01 00:00:00 UTC)));
        assert!(!record.is_valid_at(datetime!(2026-01-01 00:00:01 UTC)));
    }

    #[test]
    fn empty_user_id_is_invalid() {
        let record = SessionRecord::v1(SessionUser::new("  ", "a@b.com"), "tok", "2099-01-01T00:00:00Z");
        assert!(!record.is_valid_at(datetime!(2026-01-01 00:00:00 UTC)));
    }

    #[test]
    fn unparseable_expiry_is_invalid() {
        let record = record("not-a-timestamp");
        assert!(!record.is_valid_at(datetime!(2026-01-01 00:00:00 UTC)));
    }
}
