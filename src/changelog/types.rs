use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default log file name, created under the user's home directory.
pub const LOG_FILE_NAME: &str = "rename_log.json";

/// One committed rename, immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRecord {
    /// File name before the rename
    pub old_name: String,

    /// File name after the rename
    pub new_name: String,

    /// Directory containing the file
    pub directory: PathBuf,

    /// When the rename was committed (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,
}

impl ChangeRecord {
    pub fn new(old_name: String, new_name: String, directory: PathBuf) -> Self {
        Self {
            old_name,
            new_name,
            directory,
            timestamp: Utc::now(),
        }
    }
}
