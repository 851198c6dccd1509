use std::path::{Path, PathBuf};

/// Directory component that holds client state under the caller-supplied root.
pub const SESSION_DIR: &str = ".taskdeck";

/// Well-known file name for the single persisted session record.
pub const SESSION_FILE_NAME: &str = "session.json";

#[must_use]
pub fn session_dir(root: &Path) -> PathBuf {
    root.join(SESSION_DIR)
}

#[must_use]
pub fn default_session_path(root: &Path) -> PathBuf {
    session_dir(root).join(SESSION_FILE_NAME)
}
