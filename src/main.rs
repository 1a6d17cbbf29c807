use adb_statusline::commands::{self, status};
use adb_statusline::StatusError;
use clap::error::ErrorKind;
use colored::Colorize;
use std::process;

fn main() {
    let mut cli = status::command();
    let matches = cli.get_matches_mut();

    // At least one action flag must be given.
    if status::requested_metrics(&matches).is_empty() {
        cli.error(
            ErrorKind::MissingRequiredArgument,
            "Please specify an action, see -h",
        )
        .exit();
    }

    adb_statusline::init_logging(matches.get_count("verbose"));

    if let Err(err) = commands::status(&matches) {
        eprintln!("{} {:#}", "error:".red().bold(), err);

        let code = err
            .downcast_ref::<StatusError>()
            .map(StatusError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}
