//! Strategy file validation command implementation.

use super::CliError;
use rampart::StrategyConfig;
use std::fs;
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or has
/// unknown keys or out-of-range values.
pub(crate) fn execute(config: PathBuf) -> Result<(), CliError> {
    let text = fs::read_to_string(&config)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", config.display())))?;

    println!("Validating: {}", config.display());
    println!();

    let parsed = StrategyConfig::from_toml_str(&text);
    print_check("TOML syntax and keys", parsed.is_ok());
    let strategy = parsed?;

    let window_ok = strategy.damage_window > 0;
    print_check("damage_window > 0", window_ok);
    let threshold_ok = strategy.reactive_damage_threshold >= 0.0;
    print_check("reactive_damage_threshold >= 0", threshold_ok);
    let batch_ok = strategy.scout_batch > 0 || strategy.demolisher_batch > 0;
    print_check("attack batch not empty", batch_ok);

    if !(window_ok && threshold_ok && batch_ok) {
        return Err(CliError::new("Strategy file has out-of-range values"));
    }

    println!();
    println!("Summary:");
    println!(
        "  Ledger:     code < {}, y > {}, window {}",
        strategy.damage_code_threshold, strategy.front_row_cutoff, strategy.damage_window
    );
    println!(
        "  Threat:     exploit <= {}, fortified >= {}, turret weight {}",
        strategy.exploit_threshold, strategy.fortified_corner_threshold, strategy.turret_weight
    );
    println!(
        "  Defense:    reactive at {:.1} damage",
        strategy.reactive_damage_threshold
    );
    println!(
        "  Offense:    {} scouts needed, batches {} / {}",
        strategy.min_scouts_for_attack, strategy.scout_batch, strategy.demolisher_batch
    );
    let stall = if strategy.stall_with_interceptors { "on" } else { "off" };
    println!("  Stall:      {stall}");
    match strategy.seed {
        Some(seed) => println!("  Seed:       {seed}"),
        None => println!("  Seed:       random"),
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
