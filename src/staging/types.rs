use std::path::PathBuf;

/// A staged file: the basename plus the full path it was resolved to when
/// added. Both fields are rewritten together when a batch rename succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub path: PathBuf,
}

impl FileRef {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

/// Result of a successful `add` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The identical {name, path} pair was already staged; the set is
    /// unchanged.
    AlreadyStaged,
}
