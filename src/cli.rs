//! CLI command implementations for Rampart.

pub(crate) mod plan;
pub(crate) mod play;
pub(crate) mod validate;

use clap::ValueEnum;
use rampart::{RampartError, StrategyConfig};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `plan` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Board and plan for humans.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<RampartError> for CliError {
    fn from(e: RampartError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load a strategy file, or the defaults when none is given.
fn load_strategy(path: Option<&Path>) -> Result<StrategyConfig, CliError> {
    match path {
        Some(path) => StrategyConfig::load(path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display()))),
        None => Ok(StrategyConfig::default()),
    }
}
