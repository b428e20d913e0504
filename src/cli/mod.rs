//! CLI module for trainconf
//!
//! This module contains all CLI command handlers and utilities.

mod args;
mod commands;
mod logging;

pub use args::{
    parse_args, Cli, Command, ImportArgs, OutputFormat, PreviewArgs, ShowArgs, ValidateArgs,
};
pub use commands::run_command;
pub use logging::{init_tracing, LogLevel};
