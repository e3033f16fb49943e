use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum CursorError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Already at the root directory")]
    AtRoot,

    #[error("Cannot move to '{name}': not a subdirectory of {current}")]
    InvalidDestination { name: String, current: PathBuf },

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// One immediate child of the cursor's current directory.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
}

/// Browsing position bounded by a fixed root directory.
///
/// `current` is always `root` or a descendant of it; `navigate("..")` at the
/// root is rejected rather than clamped.
#[derive(Debug, Clone)]
pub struct PathCursor {
    root: PathBuf,
    current: PathBuf,
}

impl PathCursor {
    pub fn new(root: &Path) -> Result<Self, CursorError> {
        if !root.exists() {
            return Err(CursorError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CursorError::RootNotADirectory(root.to_path_buf()));
        }

        // Canonicalize so ascending via parent() is well-defined.
        let root = root.canonicalize()?;
        debug!(root = ?root, "Cursor initialized");

        Ok(Self {
            current: root.clone(),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn at_root(&self) -> bool {
        self.current == self.root
    }

    /// Move the cursor: `".."` ascends one level, anything else must name an
    /// immediate subdirectory of the current position. No state change on
    /// failure.
    pub fn navigate(&mut self, target: &str) -> Result<(), CursorError> {
        if target == ".." {
            if self.at_root() {
                return Err(CursorError::AtRoot);
            }
            // current != root, so a parent under root always exists
            match self.current.parent() {
                Some(parent) => {
                    let parent = parent.to_path_buf();
                    debug!(from = ?self.current, to = ?parent, "Ascending");
                    self.current = parent;
                    return Ok(());
                }
                None => return Err(CursorError::AtRoot),
            }
        }

        // Only bare entry names are navigable; separators could escape the
        // root, and "." never appears in the listing.
        if target.is_empty() || target == "." || target.chars().any(std::path::is_separator) {
            return Err(CursorError::InvalidDestination {
                name: target.to_string(),
                current: self.current.clone(),
            });
        }

        let candidate = self.current.join(target);
        if !candidate.is_dir() {
            return Err(CursorError::InvalidDestination {
                name: target.to_string(),
                current: self.current.clone(),
            });
        }

        debug!(to = ?candidate, "Descending");
        self.current = candidate;
        Ok(())
    }

    /// List every immediate child of the current directory in filesystem
    /// enumeration order. An empty vec means an empty directory; no hidden
    /// filtering, no recursion.
    pub fn list_entries(&self) -> Result<Vec<EntryInfo>, CursorError> {
        let read_dir = fs::read_dir(&self.current).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                CursorError::PermissionDenied(self.current.clone())
            } else {
                CursorError::IoError(e)
            }
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let path = entry.path();

            trace!(entry = ?path, "Examining entry");

            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().to_string(),
                None => continue,
            };

            entries.push(EntryInfo {
                name,
                is_dir: path.is_dir(),
            });
        }

        debug!(count = entries.len(), "Listing complete");
        Ok(entries)
    }
}
