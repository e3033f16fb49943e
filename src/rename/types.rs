use crate::changelog::ChangeRecord;

/// The entry a batch stopped at, with the failed filesystem call.
#[derive(Debug)]
pub struct BatchFailure {
    /// 0-based position in the staged set
    pub index: usize,
    /// Name of the file whose rename failed
    pub name: String,
    /// Name the rename was attempting to produce
    pub attempted_name: String,
    pub source: std::io::Error,
}

/// Outcome of one `apply_extension` invocation.
///
/// `records` holds one entry per committed rename, in staging order. When
/// `failure` is set, the records cover exactly the prefix that succeeded
/// before the failing entry; later entries were not attempted. Committed
/// renames are never reversed.
#[derive(Debug)]
pub struct BatchOutcome {
    pub records: Vec<ChangeRecord>,
    pub failure: Option<BatchFailure>,
}

impl BatchOutcome {
    pub fn renamed_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}
