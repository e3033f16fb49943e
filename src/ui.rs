//! Styled terminal rendering for the interactive session.
//!
//! Colored output in normal mode; everything goes through an injected writer
//! so tests can capture the screen.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::cursor::EntryInfo;
use crate::staging::FileRef;

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            colors_enabled: should_use_colors(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check FORCE_COLOR env
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

/// Styled output writer for the browse screen and command feedback.
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI writing to stdout
    pub fn new(config: UiConfig) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    pub fn header(&mut self) {
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "<<< Dark Renamer >>>".bold());
        } else {
            let _ = writeln!(self.writer, "<<< Dark Renamer >>>");
        }
    }

    pub fn separator(&mut self) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "-".repeat(60).dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", "-".repeat(60));
        }
    }

    pub fn cursor_position(&mut self, current: &Path) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "Location:".bold(),
                current.display()
            );
        } else {
            let _ = writeln!(self.writer, "Location: {}", current.display());
        }
    }

    /// Render the current directory's entries; shows a `..` row when the
    /// cursor is below the root.
    pub fn entries(&mut self, entries: &[EntryInfo], at_root: bool) {
        if entries.is_empty() {
            let _ = writeln!(self.writer, "  (empty directory)");
            return;
        }
        if !at_root {
            if self.config.colors_enabled {
                let _ = writeln!(self.writer, "  {}", "../".blue().bold());
            } else {
                let _ = writeln!(self.writer, "  ../");
            }
        }
        for entry in entries {
            if entry.is_dir {
                if self.config.colors_enabled {
                    let _ = writeln!(self.writer, "  {}", format!("{}/", entry.name).blue().bold());
                } else {
                    let _ = writeln!(self.writer, "  {}/", entry.name);
                }
            } else {
                let _ = writeln!(self.writer, "  {}", entry.name);
            }
        }
    }

    /// Render the basket with 1-based positions.
    pub fn staged(&mut self, entries: &[FileRef]) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Staged files: {}", entries.len()).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Staged files: {}", entries.len());
        }

        if entries.is_empty() {
            let _ = writeln!(self.writer, "  (nothing staged yet)");
            return;
        }

        for (i, entry) in entries.iter().enumerate() {
            if self.config.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "  {:>3}  {:<24} {}",
                    format!("{:02}", i + 1).cyan(),
                    entry.name,
                    entry.path.display().to_string().dimmed()
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    "  {:>3}  {:<24} {}",
                    format!("{:02}", i + 1),
                    entry.name,
                    entry.path.display()
                );
            }
        }
    }

    pub fn menu(&mut self) {
        let line = "add (a) / remove (r) / move (m) / rename (n) / exit (e)";
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Write a prompt without a trailing newline and flush.
    pub fn prompt(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{} ", format!("{}>", msg).cyan());
        } else {
            let _ = write!(self.writer, "{}> ", msg);
        }
        let _ = self.writer.flush();
    }

    pub fn success(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    pub fn notice(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    pub fn error(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// One committed rename in the post-batch report.
    pub fn renamed_row(&mut self, old_name: &str, new_name: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "  {} {} {}",
                old_name.dimmed(),
                "->".green(),
                new_name
            );
        } else {
            let _ = writeln!(self.writer, "  {} -> {}", old_name, new_name);
        }
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.writer);
    }
}
