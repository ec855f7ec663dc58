//! Turn snapshot decoding and the reference [`Board`] implementation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::{
    Board, Coord, Edge, GameMap, HALF_ARENA, Player, REMOVE_CODE, Resource, Side,
    StationaryUnit, UPGRADE_CODE, UnitKind, path_to_edge,
};
use crate::config::{Cost, GameConfig};
use crate::error::{RampartError, Result};

/// A unit entry as the host writes it: `[x, y, health, id]`.
#[derive(Debug, Deserialize)]
struct RawUnit(i32, i32, f64, #[allow(dead_code)] serde_json::Value);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTurnState {
    turn_info: Vec<i64>,
    p1_stats: Vec<f64>,
    p2_stats: Vec<f64>,
    p1_units: Vec<Vec<RawUnit>>,
    p2_units: Vec<Vec<RawUnit>>,
}

/// Health and purse of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStats {
    /// Remaining life points.
    pub health: f64,
    /// Cores on hand.
    pub cores: f64,
    /// Bits on hand.
    pub bits: f64,
}

impl PlayerStats {
    fn from_raw(raw: &[f64], who: &str) -> Result<Self> {
        match raw {
            [health, cores, bits, ..] => Ok(Self {
                health: *health,
                cores: *cores,
                bits: *bits,
            }),
            _ => Err(RampartError::malformed(
                "turn",
                format!("{who} stats need at least 3 values, found {}", raw.len()),
            )),
        }
    }

    fn amount(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Cores => self.cores,
            Resource::Bits => self.bits,
        }
    }

    fn amount_mut(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Cores => &mut self.cores,
            Resource::Bits => &mut self.bits,
        }
    }
}

/// One accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Place a unit.
    Spawn {
        /// Kind to place.
        kind: UnitKind,
        /// Where to place it.
        at: Coord,
    },
    /// Upgrade the local structure on a cell.
    Upgrade {
        /// Structure location.
        at: Coord,
    },
    /// Flag the local structure on a cell for removal.
    Remove {
        /// Structure location.
        at: Coord,
    },
}

/// The requests accepted this turn, ready to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Structures, upgrades, and removals, in request order.
    pub build: Vec<Request>,
    /// Mobile units, in request order.
    pub deploy: Vec<Request>,
}

/// A plan entry as the host reads it: `[shorthand, x, y]`.
#[derive(Debug, Serialize)]
struct WireEntry<'a>(&'a str, i32, i32);

impl Plan {
    /// Whether nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.deploy.is_empty()
    }

    /// Encode the build and deploy stacks as the two lines the host expects.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_wire(&self, config: &GameConfig) -> Result<(String, String)> {
        let encode = |requests: &[Request]| -> Result<String> {
            let entries: Vec<WireEntry<'_>> = requests
                .iter()
                .map(|r| match *r {
                    Request::Spawn { kind, at } => WireEntry(config.shorthand(kind), at.x, at.y),
                    Request::Upgrade { at } => WireEntry(config.upgrade_shorthand(), at.x, at.y),
                    Request::Remove { at } => WireEntry(config.remove_shorthand(), at.x, at.y),
                })
                .collect();
            Ok(serde_json::to_string(&entries)?)
        };
        Ok((encode(&self.build)?, encode(&self.deploy)?))
    }
}

/// A decoded turn snapshot that accepts requests against a simulated purse.
///
/// Accepted spawns are placed on the map straight away, so later queries in
/// the same turn see them, exactly as the host's starter kit behaves.
#[derive(Debug, Clone)]
pub struct GameState<'a> {
    config: &'a GameConfig,
    turn: u32,
    frame: i64,
    map: GameMap,
    local: PlayerStats,
    opponent: PlayerStats,
    plan: Plan,
}

impl<'a> GameState<'a> {
    /// An empty board at the start of `turn` with the given purse.
    #[must_use]
    pub fn empty(config: &'a GameConfig, turn: u32, cores: f64, bits: f64) -> Self {
        let purse = PlayerStats {
            health: 30.0,
            cores,
            bits,
        };
        Self {
            config,
            turn,
            frame: -1,
            map: GameMap::new(),
            local: purse,
            opponent: purse,
            plan: Plan::default(),
        }
    }

    /// Decode a turn snapshot line.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or misses required fields.
    pub fn from_json(config: &'a GameConfig, json: &str) -> Result<Self> {
        Self::from_value(config, serde_json::from_str(json)?)
    }

    /// Decode an already-parsed turn snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or out of range.
    pub fn from_value(config: &'a GameConfig, value: serde_json::Value) -> Result<Self> {
        let raw: RawTurnState = serde_json::from_value(value)?;
        let turn = raw
            .turn_info
            .get(1)
            .and_then(|t| u32::try_from(*t).ok())
            .ok_or_else(|| RampartError::malformed("turn", "turnInfo lacks a turn number"))?;
        let frame = raw.turn_info.get(2).copied().unwrap_or(-1);

        let mut state = Self {
            config,
            turn,
            frame,
            map: GameMap::new(),
            local: PlayerStats::from_raw(&raw.p1_stats, "p1")?,
            opponent: PlayerStats::from_raw(&raw.p2_stats, "p2")?,
            plan: Plan::default(),
        };
        state.load_units(&raw.p1_units, Player::Local)?;
        state.load_units(&raw.p2_units, Player::Opponent)?;
        Ok(state)
    }

    fn load_units(&mut self, lists: &[Vec<RawUnit>], owner: Player) -> Result<()> {
        for kind in UnitKind::ALL.into_iter().filter(|k| k.is_stationary()) {
            for RawUnit(x, y, health, _) in lists.get(kind.index()).into_iter().flatten() {
                let location = Coord::new(*x, *y);
                let unit = StationaryUnit::new(kind, owner, location, *health);
                if !self.map.place(unit) {
                    return Err(RampartError::malformed(
                        "turn",
                        format!("{kind} at {location} is off the arena or stacked"),
                    ));
                }
            }
        }
        for RawUnit(x, y, _, _) in lists.get(usize::from(UPGRADE_CODE)).into_iter().flatten() {
            if let Some(unit) = self.map.get_mut(Coord::new(*x, *y)) {
                unit.upgraded = true;
            }
        }
        for RawUnit(x, y, _, _) in lists.get(usize::from(REMOVE_CODE)).into_iter().flatten() {
            if let Some(unit) = self.map.get_mut(Coord::new(*x, *y)) {
                unit.pending_removal = true;
            }
        }
        Ok(())
    }

    /// Place a structure directly, bypassing costs; for building scenarios.
    pub fn place(&mut self, unit: StationaryUnit) -> bool {
        self.map.place(unit)
    }

    /// The occupancy grid.
    #[must_use]
    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Host frame number of the snapshot (`-1` at turn start).
    #[must_use]
    pub const fn frame(&self) -> i64 {
        self.frame
    }

    /// Stats of a player.
    #[must_use]
    pub const fn stats(&self, player: Player) -> PlayerStats {
        match player {
            Player::Local => self.local,
            Player::Opponent => self.opponent,
        }
    }

    /// Requests accepted so far.
    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Take the accepted requests, leaving an empty plan.
    pub fn take_plan(&mut self) -> Plan {
        std::mem::take(&mut self.plan)
    }

    /// The game config this snapshot was decoded with.
    #[must_use]
    pub const fn config(&self) -> &'a GameConfig {
        self.config
    }

    fn can_pay(&self, cost: Cost) -> bool {
        self.local.cores >= cost.cores && self.local.bits >= cost.bits
    }

    fn pay(&mut self, cost: Cost) {
        for resource in [Resource::Cores, Resource::Bits] {
            *self.local.amount_mut(resource) -= cost.of(resource);
        }
    }

    /// Why a single spawn would be rejected, or `None` if it is valid.
    fn spawn_rejection(&self, kind: UnitKind, at: Coord) -> Option<&'static str> {
        if !at.in_arena() || !at.is_friendly_half() {
            return Some("outside the friendly half");
        }
        if self.map.get(at).is_some() {
            return Some("cell occupied");
        }
        if kind.is_mobile() && !Edge::of(at).is_some_and(is_friendly_edge) {
            return Some("mobile units spawn on a friendly edge");
        }
        if !self.can_pay(self.config.cost(kind)) {
            return Some("cannot afford");
        }
        None
    }
}

fn is_friendly_edge(edge: Edge) -> bool {
    matches!(edge, Edge::BottomLeft | Edge::BottomRight)
}

/// The edge a spawn cell launches from: its own edge, else its quadrant's.
fn launch_edge(at: Coord) -> Edge {
    Edge::of(at).unwrap_or(match (at.side(), at.y < HALF_ARENA) {
        (Side::Left, true) => Edge::BottomLeft,
        (Side::Right, true) => Edge::BottomRight,
        (Side::Left, false) => Edge::TopLeft,
        (Side::Right, false) => Edge::TopRight,
    })
}

impl Board for GameState<'_> {
    fn turn(&self) -> u32 {
        self.turn
    }

    fn resource(&self, resource: Resource) -> f64 {
        self.local.amount(resource)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn number_affordable(&self, kind: UnitKind) -> u32 {
        let cost = self.config.cost(kind);
        [Resource::Cores, Resource::Bits]
            .into_iter()
            .filter(|r| cost.of(*r) > 0.0)
            .map(|r| (self.local.amount(r) / cost.of(r)).floor().max(0.0) as u32)
            .min()
            .unwrap_or(u32::MAX)
    }

    fn stationary_unit(&self, at: Coord) -> Option<StationaryUnit> {
        self.map.get(at).copied()
    }

    fn attackers(&self, at: Coord, victim: Player) -> Vec<StationaryUnit> {
        self.map
            .units()
            .filter(|u| u.owner == victim.opponent())
            .filter(|u| self.config.damage(u.kind, u.upgraded) > 0.0)
            .filter(|u| u.location.distance(at) <= self.config.range(u.kind, u.upgraded))
            .copied()
            .collect()
    }

    fn path_to_edge(&self, start: Coord) -> Option<Vec<Coord>> {
        path_to_edge(&self.map, start, launch_edge(start).target())
    }

    fn unit_damage(&self, kind: UnitKind) -> f64 {
        self.config.damage(kind, false)
    }

    fn spawn(&mut self, kind: UnitKind, cells: &[Coord], count: u32) -> u32 {
        let mut accepted = 0;
        for &at in cells {
            for _ in 0..count {
                if let Some(reason) = self.spawn_rejection(kind, at) {
                    debug!(%kind, %at, reason, "spawn skipped");
                    break;
                }
                self.pay(self.config.cost(kind));
                if kind.is_stationary() {
                    let health = self.config.health(kind, false);
                    self.map
                        .place(StationaryUnit::new(kind, Player::Local, at, health));
                    self.plan.build.push(Request::Spawn { kind, at });
                } else {
                    self.plan.deploy.push(Request::Spawn { kind, at });
                }
                accepted += 1;
            }
        }
        accepted
    }

    fn upgrade(&mut self, cells: &[Coord]) -> u32 {
        let mut accepted = 0;
        for &at in cells {
            let Some(unit) = self.map.get(at).copied() else {
                debug!(%at, "upgrade skipped: no structure");
                continue;
            };
            if unit.owner != Player::Local || unit.upgraded || unit.pending_removal {
                debug!(%at, "upgrade skipped: not an upgradable local structure");
                continue;
            }
            let Some(cost) = self.config.upgrade_cost(unit.kind) else {
                debug!(%at, kind = %unit.kind, "upgrade skipped: kind has no upgrade");
                continue;
            };
            if !self.can_pay(cost) {
                debug!(%at, "upgrade skipped: cannot afford");
                continue;
            }
            self.pay(cost);
            let health = self.config.health(unit.kind, true);
            if let Some(unit) = self.map.get_mut(at) {
                unit.upgraded = true;
                unit.health = health;
            }
            self.plan.build.push(Request::Upgrade { at });
            accepted += 1;
        }
        accepted
    }

    fn remove(&mut self, cells: &[Coord]) -> u32 {
        let mut accepted = 0;
        for &at in cells {
            match self.map.get_mut(at) {
                Some(unit) if unit.owner == Player::Local && !unit.pending_removal => {
                    unit.pending_removal = true;
                    self.plan.build.push(Request::Remove { at });
                    accepted += 1;
                }
                _ => debug!(%at, "removal skipped: no removable local structure"),
            }
        }
        accepted
    }
}
