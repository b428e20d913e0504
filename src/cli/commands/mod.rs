//! CLI command implementations

mod import;
mod preview;
mod show;
mod validate;


use crate::cli::{Cli, Command, LogLevel};

pub use import::run_import;
pub use preview::run_preview;
pub use show::run_show;
pub use validate::run_validate;

/// Run a CLI command
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Validate(args) => run_validate(args, log_level),
        Command::Show(args) => run_show(args, log_level),
        Command::Preview(args) => run_preview(args, log_level),
        Command::Import(args) => run_import(args, log_level),
    }
}
