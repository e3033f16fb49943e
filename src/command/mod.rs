use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::changelog::ChangeLog;
use crate::cursor::PathCursor;
use crate::error::AppError;
use crate::rename::{self, BatchOutcome};
use crate::staging::{AddOutcome, StagingError, StagingSet};
use crate::ui::Ui;

/// How many times a malformed argument is re-prompted before the command is
/// abandoned and the loop returns to browsing.
pub const MAX_ARG_ATTEMPTS: usize = 3;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Expected {expected}, got '{input}'")]
    MalformedArgument {
        input: String,
        expected: &'static str,
    },
}

/// The five recognized command verbs. Both the full word and the original
/// single-letter shortcut are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Add,
    Remove,
    Move,
    Rename,
    Exit,
}

impl Verb {
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        match token.to_ascii_lowercase().as_str() {
            "a" | "add" => Ok(Verb::Add),
            "r" | "remove" => Ok(Verb::Remove),
            "m" | "move" => Ok(Verb::Move),
            "n" | "rename" => Ok(Verb::Rename),
            "e" | "exit" => Ok(Verb::Exit),
            _ => Err(CommandError::UnknownCommand(token.to_string())),
        }
    }

    /// Prompt text for the verb's argument; `None` for exit.
    pub fn arg_prompt(&self) -> Option<&'static str> {
        match self {
            Verb::Add => Some("File name to stage"),
            Verb::Remove => Some("Position to unstage"),
            Verb::Move => Some("Destination (subdirectory or ..)"),
            Verb::Rename => Some("New extension"),
            Verb::Exit => None,
        }
    }
}

/// A fully-parsed command, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { name: String },
    /// 1-based position as shown in the staged list
    Remove { position: usize },
    Move { target: String },
    Rename { extension: String },
    Exit,
}

impl Command {
    /// Combine a verb with its raw argument line.
    pub fn from_verb_and_arg(verb: Verb, arg: &str) -> Result<Self, CommandError> {
        match verb {
            Verb::Add => {
                if arg.is_empty() {
                    return Err(CommandError::MalformedArgument {
                        input: arg.to_string(),
                        expected: "a file name",
                    });
                }
                Ok(Command::Add {
                    name: arg.to_string(),
                })
            }
            Verb::Remove => {
                let position =
                    arg.parse::<usize>()
                        .map_err(|_| CommandError::MalformedArgument {
                            input: arg.to_string(),
                            expected: "a position number",
                        })?;
                Ok(Command::Remove { position })
            }
            Verb::Move => {
                if arg.is_empty() {
                    return Err(CommandError::MalformedArgument {
                        input: arg.to_string(),
                        expected: "a destination name",
                    });
                }
                Ok(Command::Move {
                    target: arg.to_string(),
                })
            }
            // Extension validation belongs to the rename engine; even an
            // empty argument is dispatched and rejected there.
            Verb::Rename => Ok(Command::Rename {
                extension: arg.to_string(),
            }),
            Verb::Exit => Ok(Command::Exit),
        }
    }
}

/// What a dispatched command did, for presentation.
#[derive(Debug)]
pub enum Outcome {
    Added { name: String },
    AlreadyStaged { path: PathBuf },
    Removed { name: String },
    Moved { current: PathBuf },
    Renamed(BatchOutcome),
    Exit,
}

/// One interactive session: the cursor, the basket, and the audit log.
///
/// Owns all mutable state; the dispatcher routes commands here and the UI
/// only ever sees read views.
pub struct Session {
    cursor: PathCursor,
    staging: StagingSet,
    log: ChangeLog,
}

impl Session {
    pub fn new(root: &Path, log: ChangeLog) -> Result<Self, AppError> {
        let cursor = PathCursor::new(root)?;
        info!(root = ?cursor.root(), log = ?log.path(), "Session started");
        Ok(Self {
            cursor,
            staging: StagingSet::new(),
            log,
        })
    }

    pub fn cursor(&self) -> &PathCursor {
        &self.cursor
    }

    pub fn staging(&self) -> &StagingSet {
        &self.staging
    }

    /// Route one command to the owning component. Every failure comes back as
    /// a structured error; nothing here panics or terminates the session.
    pub fn dispatch(&mut self, cmd: Command) -> Result<Outcome, AppError> {
        debug!(command = ?cmd, "Dispatching");
        match cmd {
            Command::Add { name } => {
                let current = self.cursor.current().to_path_buf();
                match self.staging.add(&current, &name)? {
                    AddOutcome::Added => Ok(Outcome::Added { name }),
                    AddOutcome::AlreadyStaged => Ok(Outcome::AlreadyStaged {
                        path: current.join(&name),
                    }),
                }
            }
            Command::Remove { position } => {
                // Positions are 1-based in the UI
                if position == 0 {
                    return Err(StagingError::IndexOutOfRange {
                        index: position,
                        len: self.staging.len(),
                    }
                    .into());
                }
                let removed = self.staging.remove_at(position - 1).map_err(|_| {
                    StagingError::IndexOutOfRange {
                        index: position,
                        len: self.staging.len(),
                    }
                })?;
                Ok(Outcome::Removed { name: removed.name })
            }
            Command::Move { target } => {
                self.cursor.navigate(&target)?;
                Ok(Outcome::Moved {
                    current: self.cursor.current().to_path_buf(),
                })
            }
            Command::Rename { extension } => {
                let outcome = rename::apply_extension(&extension, &mut self.staging, &self.log)?;
                Ok(Outcome::Renamed(outcome))
            }
            Command::Exit => Ok(Outcome::Exit),
        }
    }
}

/// The blocking command loop: render, read a verb, read its argument, dispatch,
/// report, repeat. Only `exit` (or end of input) leaves the loop; every error
/// is rendered and the loop continues.
pub fn run_loop(
    session: &mut Session,
    input: &mut impl BufRead,
    ui: &mut Ui,
) -> Result<(), AppError> {
    loop {
        render_screen(session, ui);

        ui.prompt("command");
        let line = match read_line(input)? {
            Some(line) => line,
            None => break, // end of input behaves like exit
        };
        let token = line.trim();
        if token.is_empty() {
            continue;
        }

        let verb = match Verb::parse(token) {
            Ok(verb) => verb,
            Err(e) => {
                ui.error(&e.to_string());
                continue;
            }
        };

        if verb == Verb::Exit {
            info!("Session ended");
            break;
        }

        let cmd = match read_command(verb, input, ui)? {
            Some(cmd) => cmd,
            None => continue,
        };

        match session.dispatch(cmd) {
            Ok(Outcome::Exit) => break,
            Ok(outcome) => render_outcome(&outcome, ui),
            Err(e) => ui.error(&e.to_string()),
        }
    }
    Ok(())
}

/// Prompt for the verb's argument with a bounded retry on malformed input.
fn read_command(
    verb: Verb,
    input: &mut impl BufRead,
    ui: &mut Ui,
) -> Result<Option<Command>, AppError> {
    let prompt = match verb.arg_prompt() {
        Some(prompt) => prompt,
        None => return Ok(Some(Command::from_verb_and_arg(verb, "")?)),
    };

    for _ in 0..MAX_ARG_ATTEMPTS {
        ui.prompt(prompt);
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match Command::from_verb_and_arg(verb, line.trim()) {
            Ok(cmd) => return Ok(Some(cmd)),
            Err(e) => ui.error(&e.to_string()),
        }
    }

    ui.notice("Too many invalid inputs, command abandoned");
    Ok(None)
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn render_screen(session: &Session, ui: &mut Ui) {
    ui.header();
    ui.separator();
    ui.cursor_position(session.cursor().current());
    match session.cursor().list_entries() {
        Ok(entries) => ui.entries(&entries, session.cursor().at_root()),
        Err(e) => ui.error(&e.to_string()),
    }
    ui.separator();
    ui.staged(session.staging().entries());
    ui.separator();
    ui.menu();
}

fn render_outcome(outcome: &Outcome, ui: &mut Ui) {
    match outcome {
        Outcome::Added { name } => ui.success(&format!("Staged '{}'", name)),
        Outcome::AlreadyStaged { path } => {
            ui.notice(&format!("'{}' is already staged", path.display()))
        }
        Outcome::Removed { name } => ui.success(&format!("Unstaged '{}'", name)),
        Outcome::Moved { .. } => {}
        Outcome::Renamed(batch) => {
            ui.blank();
            for record in &batch.records {
                ui.renamed_row(&record.old_name, &record.new_name);
            }
            match &batch.failure {
                None => ui.success(&format!("Renamed {} file(s)", batch.renamed_count())),
                Some(failure) => {
                    ui.error(&format!(
                        "Rename of '{}' (position {}) failed: {}",
                        failure.name,
                        failure.index + 1,
                        failure.source
                    ));
                    ui.notice(&format!(
                        "{} file(s) before it were renamed and logged; later files were not touched",
                        batch.renamed_count()
                    ));
                }
            }
        }
        Outcome::Exit => {}
    }
}
