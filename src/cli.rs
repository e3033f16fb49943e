use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "darkrenamer")]
#[command(author, version, about, long_about = None)]
#[command(about = "Stage files from a directory tree and batch-rename their extensions")]
pub struct Args {
    /// Root directory to browse (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Where to append the rename log (default: ~/rename_log.json)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
