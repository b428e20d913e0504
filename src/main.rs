//! trainconf CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate an optimizer config
//! trainconf validate train.yaml --detailed
//!
//! # Print the resulting train conf
//! trainconf show train.yaml --format json
//!
//! # Learning rate every 100 steps for the first 10k
//! trainconf preview train.yaml --steps 10000 --every 100
//!
//! # Dry-run an ONNX graph import
//! trainconf import graph.yaml --opset 11
//! ```

use clap::Parser;
use std::process::ExitCode;
use trainconf::cli::{init_tracing, run_command, Cli, LogLevel};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
