//! Logging utilities for CLI output

use tracing::Level;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Most detailed library event shown on stderr
    pub fn tracing_level(self) -> Level {
        match self {
            LogLevel::Verbose => Level::DEBUG,
            LogLevel::Quiet => Level::ERROR,
            LogLevel::Normal => Level::WARN,
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Route library `tracing` events to stderr
///
/// Returns `false` when a global subscriber was already installed, in which
/// case that subscriber stays in place.
pub fn init_tracing(level: LogLevel) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level.tracing_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if !installed {
        tracing::debug!("global tracing subscriber already set, keeping it");
    }
    installed
}
