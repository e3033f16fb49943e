mod types;
mod writer;

pub use types::{ChangeRecord, LOG_FILE_NAME};
pub use writer::{ChangeLog, ChangeLogError};
