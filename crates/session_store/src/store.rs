use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::SessionStoreError;
use crate::schema::{SessionRecord, SESSION_SCHEMA_VERSION};

/// File-backed store for the single persisted [`SessionRecord`].
///
/// `save` overwrites, `load` validates and purges, `clear` removes. All three
/// are infallible from the caller's perspective: persistence failures are
/// logged and collapse to "session not saved" / "no session".
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists `record`, replacing any prior record.
    ///
    /// The write goes to a temporary file first and is committed by rename, so
    /// an interrupted write leaves the prior record intact. The committed file
    /// is then read back and compared against what was written; a mismatch is
    /// reported as "not saved" rather than trusted.
    pub fn save(&self, record: &SessionRecord) -> bool {
        match self.try_save(record) {
            Ok(()) => true,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "session record not saved");
                false
            }
        }
    }

    /// Returns the persisted record when it is present and valid now.
    ///
    /// Absent, malformed, structurally incomplete, and expired records all
    /// read as `None`, and anything invalid is purged from storage so later
    /// loads stay `None` until the next `save`.
    #[must_use]
    pub fn load(&self) -> Option<SessionRecord> {
        self.load_at(OffsetDateTime::now_utc())
    }

    /// `load` against an explicit clock. Callers outside tests want [`SessionStore::load`].
    #[must_use]
    pub fn load_at(&self, now: OffsetDateTime) -> Option<SessionRecord> {
        let record = match self.read_record() {
            Ok(record) => record,
            Err(SessionStoreError::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
                return None;
            }
            Err(error) => {
                debug!(path = %self.path.display(), %error, "purging unreadable session record");
                self.clear();
                return None;
            }
        };

        match validate_record(&self.path, &record, now) {
            Ok(()) => Some(record),
            Err(error) => {
                debug!(path = %self.path.display(), %error, "purging invalid session record");
                self.clear();
                None
            }
        }
    }

    /// Removes any persisted record. Never fails observably.
    pub fn clear(&self) {
        if let Err(error) = fs::remove_file(&self.path) {
            if error.kind() != ErrorKind::NotFound {
                warn!(path = %self.path.display(), %error, "failed to clear session record");
            }
        }
    }

    fn try_save(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| SessionStoreError::io("creating session directory", parent, source))?;
        }

        let serialized = serde_json::to_string(record)
            .map_err(|source| SessionStoreError::json_serialize(&self.path, source))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized)
            .map_err(|source| SessionStoreError::io("writing session file", &staging, source))?;
        fs::rename(&staging, &self.path)
            .map_err(|source| SessionStoreError::io("committing session file", &self.path, source))?;

        let read_back = self.read_record()?;
        if read_back != *record {
            return Err(SessionStoreError::ReadBackMismatch {
                path: self.path.clone(),
            });
        }

        Ok(())
    }

    fn read_record(&self) -> Result<SessionRecord, SessionStoreError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|source| SessionStoreError::io("reading session file", &self.path, source))?;
        serde_json::from_str(&contents).map_err(|source| SessionStoreError::json_parse(&self.path, source))
    }
}

pub(crate) fn validate_record(
    path: &Path,
    record: &SessionRecord,
    now: OffsetDateTime,
) -> Result<(), SessionStoreError> {
    if record.version != SESSION_SCHEMA_VERSION {
        return Err(SessionStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: record.version,
        });
    }

    if record.user.id.trim().is_empty() {
        return Err(SessionStoreError::MissingUserId {
            path: path.to_path_buf(),
        });
    }

    let expires_at = OffsetDateTime::parse(&record.expires_at, &Rfc3339).map_err(|_| {
        SessionStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            field: "expires_at",
            value: record.expires_at.clone(),
        }
    })?;

    if now >= expires_at {
        return Err(SessionStoreError::Expired {
            path: path.to_path_buf(),
            expires_at: record.expires_at.clone(),
        });
    }

    Ok(())
}
