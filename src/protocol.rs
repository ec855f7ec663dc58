//! The match host's line protocol.
//!
//! The host writes one JSON document per line on our stdin: first the game
//! config, then state lines whose `turnInfo[0]` tells them apart. Turn
//! snapshots (`0`) must be answered with exactly two lines, the build stack
//! and then the deploy stack. Action frames (`1`) need no answer. An
//! end-of-game line (`2`) closes the session.
//!
//! stdout belongs to the protocol; all diagnostics go through `tracing`.

use std::io::{BufRead, Write};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::arena::{GameState, Plan};
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::error::{RampartError, Result};
use crate::replay::ActionFrame;

/// Phase code of a turn snapshot.
const PHASE_TURN: i64 = 0;
/// Phase code of an action frame.
const PHASE_FRAME: i64 = 1;
/// Phase code of the end-of-game message.
const PHASE_END: i64 = 2;

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Turns answered with a plan.
    pub turns: u32,
    /// Turns answered with an empty plan because the snapshot was unusable.
    pub skipped_turns: u32,
    /// Action frames folded into history.
    pub frames: u32,
    /// Lines that could not be used at all.
    pub malformed: u32,
    /// Whether the host sent its end-of-game message.
    pub ended: bool,
}

fn phase_of(value: &Value) -> Option<i64> {
    value.get("turnInfo")?.get(0)?.as_i64()
}

fn write_plan<W: Write>(output: &mut W, config: &GameConfig, plan: &Plan) -> Result<()> {
    let (build, deploy) = plan.to_wire(config)?;
    writeln!(output, "{build}")?;
    writeln!(output, "{deploy}")?;
    output.flush()?;
    Ok(())
}

/// Read the game config line.
///
/// # Errors
///
/// Returns [`RampartError::MissingConfig`] if the host opens with a state
/// line, or a parse error if the config is malformed.
pub fn read_config(line: &str) -> Result<GameConfig> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("turnInfo").is_some() {
        return Err(RampartError::MissingConfig("a state line"));
    }
    let config = GameConfig::from_json(line)?;
    info!("game config received");
    Ok(config)
}

/// Play one match: read host lines from `input` until end of game or EOF,
/// answering turns on `output`.
///
/// Malformed state lines are logged and survived: a bad turn snapshot or a
/// stale turn gets an empty plan so the host is not left waiting, and a bad
/// action frame is dropped.
///
/// # Errors
///
/// Returns an error if the channel fails or the config line is unusable.
pub fn run<R: BufRead, W: Write>(
    engine: &mut Engine,
    input: R,
    mut output: W,
) -> Result<SessionStats> {
    let mut stats = SessionStats::default();
    let mut lines = input.lines();

    let config = loop {
        let Some(line) = lines.next() else {
            warn!("host closed the channel before sending a config");
            return Ok(stats);
        };
        let line = line?;
        if !line.trim().is_empty() {
            break read_config(line.trim())?;
        }
    };

    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "unparseable host line");
                stats.malformed += 1;
                continue;
            }
        };

        match phase_of(&value) {
            Some(PHASE_TURN) => {
                let plan = match GameState::from_value(&config, value) {
                    Ok(mut state) => {
                        debug!(frame = state.frame(), "turn snapshot");
                        match engine.on_turn(&mut state) {
                            Ok(_) => {
                                stats.turns += 1;
                                state.take_plan()
                            }
                            Err(e) => {
                                warn!(error = %e, "answering with an empty plan");
                                stats.skipped_turns += 1;
                                Plan::default()
                            }
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "bad turn snapshot, answering with an empty plan");
                        stats.skipped_turns += 1;
                        stats.malformed += 1;
                        Plan::default()
                    }
                };
                write_plan(&mut output, &config, &plan)?;
            }
            Some(PHASE_FRAME) => match ActionFrame::from_value(value) {
                Ok(frame) => {
                    engine.on_action_frame(&frame);
                    stats.frames += 1;
                }
                Err(e) => {
                    error!(error = %e, "bad action frame, ignoring it");
                    stats.malformed += 1;
                }
            },
            Some(PHASE_END) => {
                info!(turns = stats.turns, frames = stats.frames, "game over");
                stats.ended = true;
                break;
            }
            other => {
                warn!(phase = ?other, "unknown phase, ignoring line");
                stats.malformed += 1;
            }
        }
    }

    Ok(stats)
}
