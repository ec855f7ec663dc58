//! Plan command implementation.

use super::{CliError, OutputFormat, load_strategy};
use rampart::arena::GameState;
use rampart::replay::render_ascii;
use rampart::{Engine, GameConfig, Side, TurnSummary};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-serializable turn decision.
#[derive(Debug, Serialize)]
struct JsonPlan {
    /// Turn decided.
    turn: u32,
    /// Seed the engine ran with.
    seed: u64,
    /// Attack outcome, if an attack was launched.
    attack: Option<String>,
    /// Side that got reactive turrets.
    reactive: Option<Side>,
    /// Build stack in wire form.
    build: Value,
    /// Deploy stack in wire form.
    deploy: Value,
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))
}

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed.
pub(crate) fn execute(
    state: PathBuf,
    game_config: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    format: OutputFormat,
    color: bool,
) -> Result<(), CliError> {
    let game_config = match game_config {
        Some(path) => GameConfig::from_json(&read(&path)?)?,
        None => GameConfig::sample()?,
    };
    let strategy = load_strategy(config.as_deref())?;
    let mut engine = Engine::new(strategy, seed);

    let mut board = GameState::from_json(&game_config, &read(&state)?)?;
    let summary = engine.on_turn(&mut board)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_ascii(&board, color));
            println!();
            print_summary(&summary, engine.seed());
        }
        OutputFormat::Json => {
            let (build, deploy) = board.plan().to_wire(board.config())?;
            let json = JsonPlan {
                turn: summary.turn,
                seed: engine.seed(),
                attack: summary.attack().as_ref().map(ToString::to_string),
                reactive: summary.reactive(),
                build: serde_json::from_str(&build)
                    .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?,
                deploy: serde_json::from_str(&deploy)
                    .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?,
            };
            let json = serde_json::to_string_pretty(&json)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn print_summary(summary: &TurnSummary, seed: u64) {
    println!("Decision (seed: {seed})");
    match summary.offense {
        Some(offense) => println!(
            "  Attack:    {} from {} ({} scouts, {} demolishers)",
            offense.plan, offense.scouts_from, offense.scouts, offense.demolishers
        ),
        None => println!("  Attack:    saving bits"),
    }
    if summary.interceptors > 0 {
        println!("  Stall:     {} interceptors", summary.interceptors);
    }
    let damage = summary.defense.damage;
    println!(
        "  Damage:    left {:.1}  right {:.1}",
        damage.left, damage.right
    );
    match summary.reactive() {
        Some(side) => println!("  Reactive:  turrets on the {side}"),
        None => println!("  Reactive:  none (shields reinforced)"),
    }
    println!("  Accepted:  {} defense requests", summary.defense.accepted);
}
