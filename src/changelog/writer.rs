use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::types::{ChangeRecord, LOG_FILE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ChangeLogError {
    #[error("Cannot determine home directory for the rename log")]
    HomeDirUnavailable,

    #[error("Failed to write rename log: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize rename log entry: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Append-only audit log of completed rename batches.
///
/// Format is JSON Lines: every appended batch becomes one line holding the
/// JSON array of that batch's records. The file is created on first append
/// and never truncated or reordered.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    path: PathBuf,
}

impl ChangeLog {
    /// The default log at `~/rename_log.json`.
    pub fn in_home_dir() -> Result<Self, ChangeLogError> {
        let home = dirs::home_dir().ok_or(ChangeLogError::HomeDirUnavailable)?;
        Ok(Self {
            path: home.join(LOG_FILE_NAME),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one batch as a single write. An empty batch appends nothing.
    pub fn append(&self, records: &[ChangeRecord]) -> Result<(), ChangeLogError> {
        if records.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(count = records.len(), path = ?self.path, "Batch logged");
        Ok(())
    }
}
