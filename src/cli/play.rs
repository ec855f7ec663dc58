//! Play command implementation.

use super::{CliError, load_strategy};
use rampart::Engine;
use rampart::protocol;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the strategy file is invalid or the host channel fails.
pub(crate) fn execute(config: Option<PathBuf>, seed: Option<u64>) -> Result<(), CliError> {
    let strategy = load_strategy(config.as_deref())?;
    let mut engine = Engine::new(strategy, seed);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let stats = protocol::run(&mut engine, stdin, stdout)?;

    info!(
        turns = stats.turns,
        skipped = stats.skipped_turns,
        frames = stats.frames,
        malformed = stats.malformed,
        ended = stats.ended,
        "session finished"
    );
    Ok(())
}
