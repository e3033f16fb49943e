mod codes;

pub use codes::ExitCode;

use thiserror::Error;

use crate::changelog::ChangeLogError;
use crate::command::CommandError;
use crate::cursor::CursorError;
use crate::rename::RenameError;
use crate::staging::StagingError;

/// Top-level error surfaced by the dispatcher or the CLI entry point.
///
/// Inside a session every variant is rendered and the loop returns to
/// browsing; only startup failures (bad root, unusable log) terminate the
/// process with `exit_code()`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Cursor(#[from] CursorError),

    #[error("{0}")]
    Staging(#[from] StagingError),

    #[error("{0}")]
    Rename(#[from] RenameError),

    #[error("{0}")]
    ChangeLog(#[from] ChangeLogError),

    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Cursor(CursorError::RootNotFound(_))
            | AppError::Cursor(CursorError::RootNotADirectory(_)) => ExitCode::RootNotFound,
            AppError::Cursor(CursorError::PermissionDenied(_)) => ExitCode::PermissionError,
            AppError::Cursor(_) | AppError::Staging(_) | AppError::Command(_) => {
                ExitCode::GeneralError
            }
            AppError::Rename(_) => ExitCode::RenameError,
            AppError::ChangeLog(_) => ExitCode::LogError,
            AppError::Input(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Cursor(CursorError::RootNotFound(path)) => {
                format!(
                    "The root directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::Cursor(CursorError::RootNotADirectory(path)) => {
                format!(
                    "The root path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::ChangeLog(ChangeLogError::HomeDirUnavailable) => {
                "Cannot locate a home directory for the rename log.\n\
                 Pass --log-file to choose a log location explicitly."
                    .to_string()
            }

            other => other.to_string(),
        }
    }
}
