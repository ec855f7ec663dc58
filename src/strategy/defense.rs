//! Layered defense construction.
//!
//! The layout is fixed. Each turn the builder asks for every tier again, in
//! priority order, and lets the board skip whatever already stands or cannot
//! be paid for. Cores therefore flow to the front line first and to the rear
//! only once everything ahead of it exists and is upgraded.

use tracing::{debug, info};

use crate::arena::{Board, Coord, Side, UnitKind};
use crate::config::StrategyConfig;
use crate::strategy::ledger::{DamageLedger, SideDamage};

/// Turrets guarding the two corners and the flanks.
pub const PRIMARY_TURRETS: [Coord; 4] = [
    Coord::new(3, 12),
    Coord::new(24, 12),
    Coord::new(6, 11),
    Coord::new(21, 11),
];

/// Walls screening the primary turrets.
pub const PRIMARY_WALLS: [Coord; 10] = [
    Coord::new(0, 13),
    Coord::new(1, 13),
    Coord::new(2, 13),
    Coord::new(3, 13),
    Coord::new(24, 13),
    Coord::new(25, 13),
    Coord::new(26, 13),
    Coord::new(27, 13),
    Coord::new(6, 12),
    Coord::new(21, 12),
];

/// First fill of the center line.
pub const SECONDARY_WALLS: [Coord; 6] = [
    Coord::new(7, 12),
    Coord::new(20, 12),
    Coord::new(10, 12),
    Coord::new(17, 12),
    Coord::new(13, 12),
    Coord::new(14, 12),
];

/// Second fill of the center line.
pub const TERTIARY_WALLS: [Coord; 6] = [
    Coord::new(9, 12),
    Coord::new(18, 12),
    Coord::new(11, 12),
    Coord::new(16, 12),
    Coord::new(12, 12),
    Coord::new(15, 12),
];

/// Turrets behind the flanks and the center.
pub const SECONDARY_TURRETS: [Coord; 4] = [
    Coord::new(4, 11),
    Coord::new(23, 11),
    Coord::new(10, 11),
    Coord::new(17, 11),
];

/// Turrets filling the center.
pub const TERTIARY_TURRETS: [Coord; 4] = [
    Coord::new(13, 11),
    Coord::new(14, 11),
    Coord::new(8, 11),
    Coord::new(19, 11),
];

/// Rear shield cluster.
pub const SHIELD_CLUSTER: [Coord; 4] = [
    Coord::new(13, 2),
    Coord::new(14, 2),
    Coord::new(13, 3),
    Coord::new(14, 3),
];

const REACTIVE_LEFT: [Coord; 3] = [Coord::new(3, 10), Coord::new(4, 10), Coord::new(5, 10)];
const REACTIVE_RIGHT: [Coord; 3] = [Coord::new(24, 10), Coord::new(23, 10), Coord::new(22, 10)];

/// Turret cells on a side's rear ring used for reactive reinforcement.
#[must_use]
pub const fn reactive_cells(side: Side) -> &'static [Coord] {
    match side {
        Side::Left => &REACTIVE_LEFT,
        Side::Right => &REACTIVE_RIGHT,
    }
}

/// Spawn turrets on the rear ring of `side`. Returns how many the board accepted.
pub fn reinforce<B: Board + ?Sized>(board: &mut B, side: Side) -> u32 {
    let accepted = board.spawn(UnitKind::Turret, reactive_cells(side), 1);
    info!(%side, accepted, "reactive reinforcement");
    accepted
}

/// What one builder pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefenseOutcome {
    /// Windowed damage read from the ledger.
    pub damage: SideDamage,
    /// Side that received reactive turrets, if the damage warranted it.
    pub reactive: Option<Side>,
    /// Requests the board accepted, all tiers together.
    pub accepted: u32,
}

/// Issues the fixed defensive layout, tier by tier.
#[derive(Debug, Clone, Copy)]
pub struct DefenseBuilder<'a> {
    config: &'a StrategyConfig,
}

impl<'a> DefenseBuilder<'a> {
    /// A builder using the given thresholds.
    #[must_use]
    pub const fn new(config: &'a StrategyConfig) -> Self {
        Self { config }
    }

    /// Run every tier against `board`, consulting `ledger` for the reactive branch.
    pub fn build<B: Board + ?Sized>(&self, board: &mut B, ledger: &DamageLedger) -> DefenseOutcome {
        let mut accepted = 0;

        accepted += board.spawn(UnitKind::Turret, &PRIMARY_TURRETS, 1);
        accepted += board.spawn(UnitKind::Wall, &PRIMARY_WALLS, 1);
        accepted += board.spawn(UnitKind::Wall, &SECONDARY_WALLS, 1);
        accepted += board.upgrade(&PRIMARY_WALLS);

        accepted += board.spawn(UnitKind::Wall, &TERTIARY_WALLS, 1);
        accepted += board.spawn(UnitKind::Turret, &SECONDARY_TURRETS, 1);
        let damage = ledger.rolling_total(board.turn(), self.config.damage_window);
        accepted += board.spawn(UnitKind::Turret, &TERTIARY_TURRETS, 1);

        accepted += board.upgrade(&PRIMARY_TURRETS);
        accepted += board.upgrade(&SECONDARY_TURRETS);
        accepted += board.upgrade(&TERTIARY_TURRETS);
        accepted += board.upgrade(&SECONDARY_WALLS);
        accepted += board.upgrade(&TERTIARY_WALLS);

        accepted += board.spawn(UnitKind::Shield, &SHIELD_CLUSTER, 1);

        debug!(
            left = damage.left,
            right = damage.right,
            window = self.config.damage_window,
            "damage split"
        );
        let reactive = if damage.total() < self.config.reactive_damage_threshold {
            accepted += board.spawn(UnitKind::Shield, &SHIELD_CLUSTER, 1);
            None
        } else {
            let side = damage.heavier();
            accepted += reinforce(board, side);
            Some(side)
        };

        DefenseOutcome {
            damage,
            reactive,
            accepted,
        }
    }
}
