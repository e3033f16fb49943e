mod types;

pub use types::{AddOutcome, FileRef};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("'{name}' is not a plain file name")]
    InvalidName { name: String },

    #[error("'{name}' not found in {dir}")]
    NotFound { name: String, dir: PathBuf },

    #[error("'{name}' is not a file")]
    NotAFile { name: String },

    #[error("No staged entry at position {index} (staged: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The basket: an ordered, duplicate-free collection of staged files.
///
/// Insertion order is preserved; two entries are duplicates only when both
/// name and path match. The set lives for one session and is never persisted.
#[derive(Debug, Default)]
pub struct StagingSet {
    entries: Vec<FileRef>,
}

impl StagingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` against `dir` and stage it. Staging the same resolved
    /// file twice is a reported no-op, not an error.
    ///
    /// `name` must be a bare file name: a separator-bearing name would break
    /// the basename invariant of `FileRef` and could resolve outside the
    /// cursor's current directory.
    pub fn add(&mut self, dir: &Path, name: &str) -> Result<AddOutcome, StagingError> {
        if name.is_empty() || name.chars().any(std::path::is_separator) {
            return Err(StagingError::InvalidName {
                name: name.to_string(),
            });
        }

        let path = dir.join(name);

        if path.is_dir() {
            return Err(StagingError::NotAFile {
                name: name.to_string(),
            });
        }
        if !path.is_file() {
            return Err(StagingError::NotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            });
        }

        let file_ref = FileRef::new(name.to_string(), path);
        if self.entries.contains(&file_ref) {
            debug!(name = %name, "Already staged");
            return Ok(AddOutcome::AlreadyStaged);
        }

        debug!(name = %name, path = ?file_ref.path, "Staged");
        self.entries.push(file_ref);
        Ok(AddOutcome::Added)
    }

    /// Remove the entry at a 0-based position, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> Result<FileRef, StagingError> {
        if index >= self.entries.len() {
            return Err(StagingError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        debug!(name = %removed.name, "Unstaged");
        Ok(removed)
    }

    /// Ordered view of the staged entries; display positions are 1-based and
    /// derived from this order at render time.
    pub fn entries(&self) -> &[FileRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rewrite one entry in place after a successful filesystem rename.
    /// Out-of-range indices are ignored.
    pub fn rewrite(&mut self, index: usize, name: String, path: PathBuf) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.name = name;
            entry.path = path;
        }
    }
}
