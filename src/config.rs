//! Game and strategy configuration.
//!
//! Two sources feed the engine:
//! - the host's game config, sent as the first protocol line, which defines
//!   unit costs, health, ranges, damage, and wire shorthands;
//! - an optional strategy file (TOML) with the tuning constants of the
//!   decision layer. Every field has a default, so an empty file is valid.

use std::path::Path;

use serde::Deserialize;

use crate::arena::{Resource, UnitKind};
use crate::error::{RampartError, Result};

/// Cost of a unit or upgrade in both currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cost {
    /// Cores required.
    pub cores: f64,
    /// Bits required.
    pub bits: f64,
}

impl Cost {
    /// Amount of one currency.
    #[must_use]
    pub const fn of(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Cores => self.cores,
            Resource::Bits => self.bits,
        }
    }
}

/// Stat overrides applied by a unit's one-time upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpgradeStats {
    /// Upgrade price in cores.
    pub cost1: Option<f64>,
    /// Upgrade price in bits.
    pub cost2: Option<f64>,
    /// Health after upgrading.
    pub start_health: Option<f64>,
    /// Attack range after upgrading.
    pub attack_range: Option<f64>,
    /// Damage against mobile units after upgrading.
    pub attack_damage_walker: Option<f64>,
}

/// One entry of the host's `unitInformation` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitStats {
    /// Two-letter wire name, e.g. `FF`.
    pub shorthand: String,
    /// Price in cores.
    pub cost1: f64,
    /// Price in bits.
    pub cost2: f64,
    /// Health when spawned.
    pub start_health: f64,
    /// Attack radius in cells.
    pub attack_range: f64,
    /// Damage per frame against mobile units.
    pub attack_damage_walker: f64,
    /// Damage per frame against structures.
    pub attack_damage_tower: f64,
    /// Present when the unit can be upgraded.
    pub upgrade: Option<UpgradeStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameConfig {
    unit_information: Vec<UnitStats>,
}

/// The host's game config, resolved into per-kind stats.
#[derive(Debug, Clone)]
pub struct GameConfig {
    units: Vec<UnitStats>,
    remove_shorthand: String,
    upgrade_shorthand: String,
}

/// A realistic host config, used by the `plan` command's docs, tests, and benches.
pub const SAMPLE_GAME_CONFIG: &str = r#"{
  "unitInformation": [
    {"shorthand": "FF", "cost1": 1.0, "startHealth": 60.0, "upgrade": {"cost1": 1.0, "startHealth": 120.0}},
    {"shorthand": "EF", "cost1": 4.0, "startHealth": 30.0, "upgrade": {"cost1": 4.0}},
    {"shorthand": "DF", "cost1": 6.0, "startHealth": 75.0, "attackRange": 2.5, "attackDamageWalker": 6.0,
     "upgrade": {"cost1": 6.0, "attackRange": 3.5, "attackDamageWalker": 14.0}},
    {"shorthand": "PI", "cost2": 1.0, "startHealth": 15.0, "attackRange": 3.5, "attackDamageWalker": 2.0, "attackDamageTower": 2.0},
    {"shorthand": "EI", "cost2": 3.0, "startHealth": 5.0, "attackRange": 4.5, "attackDamageWalker": 8.0, "attackDamageTower": 8.0},
    {"shorthand": "SI", "cost2": 1.0, "startHealth": 40.0, "attackRange": 4.5, "attackDamageWalker": 20.0},
    {"shorthand": "RM"},
    {"shorthand": "UP"}
  ],
  "resources": {"turnIntervalForBitSchedule": 10, "bitsPerRound": 5.0, "coresPerRound": 4.0}
}"#;

impl GameConfig {
    /// Parse the host's config message.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or defines fewer than six units.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawGameConfig = serde_json::from_str(json)?;
        Self::from_units(raw.unit_information)
    }

    /// Build from an already-decoded `unitInformation` table.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than six unit kinds are present, or if a kind
    /// has no positive price in the currency that pays for it.
    pub fn from_units(mut units: Vec<UnitStats>) -> Result<Self> {
        if units.len() < UnitKind::ALL.len() {
            return Err(RampartError::malformed(
                "config",
                format!("expected at least 6 unit entries, found {}", units.len()),
            ));
        }
        for kind in UnitKind::ALL {
            let stats = &units[kind.index()];
            let cost = Cost {
                cores: stats.cost1,
                bits: stats.cost2,
            };
            let price = cost.of(kind.resource());
            if price.is_nan() || price <= 0.0 {
                return Err(RampartError::malformed(
                    "config",
                    format!("{kind} has no positive {:?} price", kind.resource()),
                ));
            }
        }
        let shorthand_at = |units: &[UnitStats], i: usize, fallback: &str| {
            units
                .get(i)
                .map(|u| u.shorthand.clone())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        let remove_shorthand = shorthand_at(&units, 6, "RM");
        let upgrade_shorthand = shorthand_at(&units, 7, "UP");
        units.truncate(UnitKind::ALL.len());

        Ok(Self {
            units,
            remove_shorthand,
            upgrade_shorthand,
        })
    }

    /// The sample config, parsed.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`GameConfig::from_json`].
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_GAME_CONFIG)
    }

    /// Raw stats for a kind.
    #[must_use]
    pub fn stats(&self, kind: UnitKind) -> &UnitStats {
        &self.units[kind.index()]
    }

    /// Spawn cost of a kind.
    #[must_use]
    pub fn cost(&self, kind: UnitKind) -> Cost {
        let stats = self.stats(kind);
        Cost {
            cores: stats.cost1,
            bits: stats.cost2,
        }
    }

    /// Upgrade cost of a kind, or `None` if it cannot be upgraded.
    #[must_use]
    pub fn upgrade_cost(&self, kind: UnitKind) -> Option<Cost> {
        let stats = self.stats(kind);
        stats.upgrade.as_ref().map(|up| Cost {
            cores: up.cost1.unwrap_or(stats.cost1),
            bits: up.cost2.unwrap_or(stats.cost2),
        })
    }

    /// Attack range, taking the upgrade into account.
    #[must_use]
    pub fn range(&self, kind: UnitKind, upgraded: bool) -> f64 {
        let stats = self.stats(kind);
        Self::upgraded_field(stats, upgraded, |u| u.attack_range)
            .unwrap_or(stats.attack_range)
    }

    /// Damage against mobile units, taking the upgrade into account.
    #[must_use]
    pub fn damage(&self, kind: UnitKind, upgraded: bool) -> f64 {
        let stats = self.stats(kind);
        Self::upgraded_field(stats, upgraded, |u| u.attack_damage_walker)
            .unwrap_or(stats.attack_damage_walker)
    }

    /// Spawn health, taking the upgrade into account.
    #[must_use]
    pub fn health(&self, kind: UnitKind, upgraded: bool) -> f64 {
        let stats = self.stats(kind);
        Self::upgraded_field(stats, upgraded, |u| u.start_health)
            .unwrap_or(stats.start_health)
    }

    fn upgraded_field(
        stats: &UnitStats,
        upgraded: bool,
        field: impl Fn(&UpgradeStats) -> Option<f64>,
    ) -> Option<f64> {
        if upgraded {
            stats.upgrade.as_ref().and_then(field)
        } else {
            None
        }
    }

    /// Wire shorthand for a kind.
    #[must_use]
    pub fn shorthand(&self, kind: UnitKind) -> &str {
        &self.stats(kind).shorthand
    }

    /// Wire shorthand for a removal request.
    #[must_use]
    pub fn remove_shorthand(&self) -> &str {
        &self.remove_shorthand
    }

    /// Wire shorthand for an upgrade request.
    #[must_use]
    pub fn upgrade_shorthand(&self) -> &str {
        &self.upgrade_shorthand
    }
}

/// Tuning constants of the decision layer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyConfig {
    /// Damage events with a type code at or above this are ignored by the ledger.
    pub damage_code_threshold: u8,
    /// Damage events at `y <= front_row_cutoff` are ignored by the ledger.
    pub front_row_cutoff: i32,
    /// Number of past turns summed when reading the ledger.
    pub damage_window: u32,
    /// Below this windowed damage the builder reinforces shields instead of turrets.
    pub reactive_damage_threshold: f64,
    /// A side whose non-corner value is at or below this is exploited at once.
    pub exploit_threshold: u32,
    /// Corner score at which a corner counts as fortified.
    pub fortified_corner_threshold: u32,
    /// Weight of one turret relative to one wall when scoring defenses.
    pub turret_weight: u32,
    /// Minimum affordable scouts before any attack is launched.
    pub min_scouts_for_attack: u32,
    /// Scouts requested per attack.
    pub scout_batch: u32,
    /// Demolishers requested per attack.
    pub demolisher_batch: u32,
    /// Spend leftover bits on randomly placed interceptors.
    pub stall_with_interceptors: bool,
    /// Seed for interceptor placement; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            damage_code_threshold: 3,
            front_row_cutoff: 6,
            damage_window: 5,
            reactive_damage_threshold: 20.0,
            exploit_threshold: 6,
            fortified_corner_threshold: 10,
            turret_weight: 3,
            min_scouts_for_attack: 16,
            scout_batch: 7,
            demolisher_batch: 3,
            stall_with_interceptors: false,
            seed: None,
        }
    }
}

impl StrategyConfig {
    /// Parse a strategy file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a strategy file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_config_parses() {
        let config = GameConfig::sample().unwrap();
        assert_eq!(config.shorthand(UnitKind::Wall), "FF");
        assert_eq!(config.shorthand(UnitKind::Interceptor), "SI");
        assert_eq!(config.remove_shorthand(), "RM");
        assert_eq!(config.upgrade_shorthand(), "UP");
        assert!((config.cost(UnitKind::Turret).cores - 6.0).abs() < f64::EPSILON);
        assert!((config.cost(UnitKind::Scout).bits - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upgrade_overrides() {
        let config = GameConfig::sample().unwrap();
        assert!((config.range(UnitKind::Turret, false) - 2.5).abs() < f64::EPSILON);
        assert!((config.range(UnitKind::Turret, true) - 3.5).abs() < f64::EPSILON);
        assert!((config.damage(UnitKind::Turret, true) - 14.0).abs() < f64::EPSILON);
        assert!((config.health(UnitKind::Wall, true) - 120.0).abs() < f64::EPSILON);
        // Shields upgrade without changing health in the sample.
        assert!((config.health(UnitKind::Shield, true) - 30.0).abs() < f64::EPSILON);
        assert!(config.upgrade_cost(UnitKind::Scout).is_none());
    }

    #[test]
    fn test_unpriced_units_rejected() {
        // Older hosts key prices as "cost"; those fields are not read, so
        // every kind would come out free.
        let json = r#"{"unitInformation": [
            {"shorthand": "FF", "cost": 1.0}, {"shorthand": "EF", "cost": 4.0},
            {"shorthand": "DF", "cost": 6.0}, {"shorthand": "PI", "cost": 1.0},
            {"shorthand": "EI", "cost": 3.0}, {"shorthand": "SI", "cost": 1.0}
        ]}"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, RampartError::MalformedMessage { kind: "config", .. }));
        assert!(err.to_string().contains("wall"));
    }

    #[test]
    fn test_structure_priced_only_in_bits_rejected() {
        let json = SAMPLE_GAME_CONFIG.replace(
            r#"{"shorthand": "FF", "cost1": 1.0,"#,
            r#"{"shorthand": "FF", "cost2": 1.0,"#,
        );
        assert!(GameConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_too_few_units_rejected() {
        let err = GameConfig::from_json(r#"{"unitInformation": [{"shorthand": "FF"}]}"#)
            .unwrap_err();
        assert!(matches!(err, RampartError::MalformedMessage { .. }));
    }

    #[test]
    fn test_strategy_defaults_from_empty_file() {
        let config = StrategyConfig::from_toml_str("").unwrap();
        assert_eq!(config, StrategyConfig::default());
        assert_eq!(config.damage_code_threshold, 3);
        assert_eq!(config.front_row_cutoff, 6);
    }

    #[test]
    fn test_strategy_partial_override_and_unknown_key() {
        let config = StrategyConfig::from_toml_str("exploit_threshold = 4\nseed = 9\n").unwrap();
        assert_eq!(config.exploit_threshold, 4);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.turret_weight, 3);

        assert!(StrategyConfig::from_toml_str("bogus = 1").is_err());
    }

    #[test]
    fn test_strategy_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stall_with_interceptors = true").unwrap();
        let config = StrategyConfig::load(file.path()).unwrap();
        assert!(config.stall_with_interceptors);
    }
}
