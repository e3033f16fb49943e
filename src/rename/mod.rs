mod types;

pub use types::{BatchFailure, BatchOutcome};

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::changelog::{ChangeLog, ChangeLogError, ChangeRecord};
use crate::staging::StagingSet;

// Extensions are letters only: "mp4x2", "tar.gz" and "" are all rejected.
static EXTENSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Invalid extension '{0}': only letters are allowed")]
    InvalidExtension(String),

    #[error("Renames committed but the log append failed: {0}")]
    LogError(#[from] ChangeLogError),
}

/// Compute the new file name for an extension change.
///
/// The extension is the text after the last dot; a name without one gets the
/// suffix appended. A single leading dot (`.bashrc`) does not count as an
/// extension separator.
pub fn replace_extension(name: &str, new_ext: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => format!("{}.{}", &name[..pos], new_ext),
        _ => format!("{}.{}", name, new_ext),
    }
}

/// Apply an extension change to every staged file, in staging order.
///
/// Not transactional: the first filesystem failure halts the batch, and the
/// already-renamed prefix stays renamed, rewritten in the staging set, and
/// logged. Validation failures happen before any filesystem work.
pub fn apply_extension(
    new_ext: &str,
    staging: &mut StagingSet,
    log: &ChangeLog,
) -> Result<BatchOutcome, RenameError> {
    if !EXTENSION_REGEX.is_match(new_ext) {
        return Err(RenameError::InvalidExtension(new_ext.to_string()));
    }

    info!(
        extension = %new_ext,
        count = staging.len(),
        "Applying extension change"
    );

    let mut records = Vec::new();
    let mut failure = None;

    for index in 0..staging.len() {
        let (old_name, old_path) = {
            let entry = &staging.entries()[index];
            (entry.name.clone(), entry.path.clone())
        };

        let new_name = replace_extension(&old_name, new_ext);
        let directory = old_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let new_path = directory.join(&new_name);

        debug!(from = %old_name, to = %new_name, "Renaming");

        if let Err(e) = fs::rename(&old_path, &new_path) {
            warn!(
                name = %old_name,
                error = %e,
                "Rename failed, halting batch"
            );
            failure = Some(BatchFailure {
                index,
                name: old_name,
                attempted_name: new_name,
                source: e,
            });
            break;
        }

        staging.rewrite(index, new_name.clone(), new_path);
        records.push(ChangeRecord::new(old_name, new_name, directory));
    }

    // The committed prefix is logged even when the batch halted early.
    log.append(&records)?;

    info!(
        renamed = records.len(),
        complete = failure.is_none(),
        "Batch finished"
    );

    Ok(BatchOutcome { records, failure })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn staged(dir: &Path, names: &[&str]) -> StagingSet {
        let mut staging = StagingSet::new();
        for name in names {
            fs::write(dir.join(name), "x").unwrap();
            staging.add(dir, name).unwrap();
        }
        staging
    }

    fn temp_log(dir: &Path) -> ChangeLog {
        ChangeLog::at_path(dir.join("rename_log.json"))
    }

    #[test]
    fn test_replace_extension_swaps_suffix() {
        assert_eq!(replace_extension("a.png", "jpg"), "a.jpg");
        assert_eq!(replace_extension("archive.tar.gz", "zip"), "archive.tar.zip");
    }

    #[test]
    fn test_replace_extension_appends_when_missing() {
        assert_eq!(replace_extension("README", "txt"), "README.txt");
        assert_eq!(replace_extension(".bashrc", "txt"), ".bashrc.txt");
    }

    #[test]
    fn test_invalid_extension_rejected_without_side_effects() {
        let dir = tempdir().unwrap();
        let mut staging = staged(dir.path(), &["a.png"]);
        let log = temp_log(dir.path());

        for ext in ["mp4x2", "jpg!", "", "tar.gz"] {
            let result = apply_extension(ext, &mut staging, &log);
            assert!(matches!(result, Err(RenameError::InvalidExtension(_))), "{ext}");
        }

        // Nothing touched
        assert!(dir.path().join("a.png").exists());
        assert_eq!(staging.entries()[0].name, "a.png");
        assert!(!log.path().exists());
    }

    #[test]
    fn test_apply_renames_and_rewrites_staging() {
        let dir = tempdir().unwrap();
        let mut staging = staged(dir.path(), &["a.png", "b.png"]);
        let log = temp_log(dir.path());

        let outcome = apply_extension("jpg", &mut staging, &log).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.renamed_count(), 2);
        assert!(dir.path().join("a.jpg").exists());
        assert!(!dir.path().join("a.png").exists());
        assert_eq!(staging.entries()[0].name, "a.jpg");
        assert_eq!(staging.entries()[0].path, dir.path().join("a.jpg"));

        let record = &outcome.records[0];
        assert_eq!(record.old_name, "a.png");
        assert_eq!(record.new_name, "a.jpg");
        assert_eq!(record.directory, dir.path());
    }

    #[test]
    fn test_same_extension_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut staging = staged(dir.path(), &["notes.txt"]);
        let log = temp_log(dir.path());

        let outcome = apply_extension("txt", &mut staging, &log).unwrap();

        assert_eq!(outcome.renamed_count(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.old_name, record.new_name);
        assert!(dir.path().join("notes.txt").exists());

        // Repeating the call behaves the same
        let again = apply_extension("txt", &mut staging, &log).unwrap();
        assert_eq!(again.renamed_count(), 1);
    }

    #[test]
    fn test_partial_failure_keeps_prefix() {
        let dir = tempdir().unwrap();
        let mut staging = staged(dir.path(), &["a.png", "b.png", "c.png"]);
        let log = temp_log(dir.path());

        // Break the second entry: its file disappears before the batch runs.
        fs::remove_file(dir.path().join("b.png")).unwrap();

        let outcome = apply_extension("jpg", &mut staging, &log).unwrap();

        // File 1 renamed and rewritten
        assert!(dir.path().join("a.jpg").exists());
        assert_eq!(staging.entries()[0].name, "a.jpg");

        // Failure references file 2; file 3 untouched
        let failure = outcome.failure.expect("batch should have halted");
        assert_eq!(failure.index, 1);
        assert_eq!(failure.name, "b.png");
        assert_eq!(failure.attempted_name, "b.jpg");
        assert!(dir.path().join("c.png").exists());
        assert_eq!(staging.entries()[2].name, "c.png");

        // Only the committed prefix is logged
        assert_eq!(outcome.records.len(), 1);
        let content = fs::read_to_string(log.path()).unwrap();
        let batch: Vec<ChangeRecord> = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].old_name, "a.png");
    }

    #[test]
    fn test_empty_staging_is_a_noop() {
        let dir = tempdir().unwrap();
        let mut staging = StagingSet::new();
        let log = temp_log(dir.path());

        let outcome = apply_extension("jpg", &mut staging, &log).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.renamed_count(), 0);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_log_failure_surfaces_after_rename() {
        let dir = tempdir().unwrap();
        let mut staging = staged(dir.path(), &["a.png"]);
        let log = ChangeLog::at_path(PathBuf::from("/nonexistent/dir/log.json"));

        let result = apply_extension("jpg", &mut staging, &log);

        assert!(matches!(result, Err(RenameError::LogError(_))));
        // The rename itself was committed before the log append failed
        assert!(dir.path().join("a.jpg").exists());
    }
}
