use std::io;

use clap::Parser;
use tracing::error;

use darkrenamer::changelog::ChangeLog;
use darkrenamer::cli::Args;
use darkrenamer::command::{run_loop, Session};
use darkrenamer::error::AppError;
use darkrenamer::logging;
use darkrenamer::ui::{Ui, UiConfig};

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().map_err(AppError::Input)?,
    };

    let log = match args.log_file {
        Some(path) => ChangeLog::at_path(path),
        None => ChangeLog::in_home_dir()?,
    };

    let mut session = Session::new(&root, log)?;
    let mut ui = Ui::new(UiConfig::new());

    let stdin = io::stdin();
    let mut input = stdin.lock();

    run_loop(&mut session, &mut input, &mut ui)
}
