pub mod changelog;
pub mod cli;
pub mod command;
pub mod cursor;
pub mod error;
pub mod logging;
pub mod rename;
pub mod staging;
pub mod ui;

pub use changelog::{ChangeLog, ChangeLogError, ChangeRecord, LOG_FILE_NAME};
pub use command::{run_loop, Command, CommandError, Outcome, Session, Verb};
pub use cursor::{CursorError, EntryInfo, PathCursor};
pub use error::{AppError, ExitCode};
pub use rename::{apply_extension, replace_extension, BatchFailure, BatchOutcome, RenameError};
pub use staging::{AddOutcome, FileRef, StagingError, StagingSet};
