//! Threat assessment: where is the opponent weakest?
//!
//! Both halves of the opponent's territory are scored by weighted structure
//! count, once over the front corner only and once over the whole half. A half
//! that is nearly empty behind its corner is exploited at once; otherwise the
//! corners are compared.

use tracing::debug;

use crate::arena::{ARENA_SIZE, Board, Coord, HALF_ARENA, Player, Side, UnitKind};
use crate::config::StrategyConfig;

/// Front-most opponent cells of the left corner.
const PRIMARY_CORNER_LEFT: [Coord; 4] = [
    Coord::new(0, 14),
    Coord::new(1, 14),
    Coord::new(2, 14),
    Coord::new(3, 14),
];

/// The ring behind [`PRIMARY_CORNER_LEFT`].
const SECONDARY_CORNER_LEFT: [Coord; 6] = [
    Coord::new(1, 15),
    Coord::new(2, 15),
    Coord::new(3, 15),
    Coord::new(2, 16),
    Coord::new(3, 16),
    Coord::new(3, 17),
];

/// The attack chosen for this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackPlan {
    /// Push into the corner on this side, steering the path with a corner plug.
    Conventional(Side),
    /// The half on this side is thin; go straight at it.
    ExploitCorner(Side),
}

impl AttackPlan {
    /// The side under attack.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            AttackPlan::Conventional(side) | AttackPlan::ExploitCorner(side) => side,
        }
    }
}

impl std::fmt::Display for AttackPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackPlan::Conventional(side) => write!(f, "conventional-{side}"),
            AttackPlan::ExploitCorner(side) => write!(f, "exploit-{side}"),
        }
    }
}

/// A weighted score per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideScores {
    /// Left half.
    pub left: u32,
    /// Right half.
    pub right: u32,
}

impl SideScores {
    /// Score for one side.
    #[must_use]
    pub const fn on(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The side with the lower score; ties go left.
    #[must_use]
    pub const fn lower(&self) -> Side {
        if self.left <= self.right {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Everything the assessor looked at, with its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatReport {
    /// Weighted structures in each front corner.
    pub corner: SideScores,
    /// Weighted structures over each whole opponent half.
    pub half: SideScores,
    /// The chosen attack.
    pub plan: AttackPlan,
}

impl ThreatReport {
    /// Half value with the corner taken out.
    #[must_use]
    pub const fn value_no_corner(&self, side: Side) -> u32 {
        self.half.on(side).saturating_sub(self.corner.on(side))
    }
}

/// Corner cells of a side: primary ring then secondary ring.
#[must_use]
pub fn corner_cells(side: Side) -> Vec<Coord> {
    let left = PRIMARY_CORNER_LEFT.iter().chain(&SECONDARY_CORNER_LEFT);
    match side {
        Side::Left => left.copied().collect(),
        Side::Right => left.map(|c| c.mirrored()).collect(),
    }
}

/// Opponent-half cells on a side.
fn half_cells(side: Side) -> impl Iterator<Item = Coord> {
    let xs = match side {
        Side::Left => 0..HALF_ARENA,
        Side::Right => HALF_ARENA..ARENA_SIZE,
    };
    (HALF_ARENA..ARENA_SIZE)
        .flat_map(move |y| xs.clone().map(move |x| Coord::new(x, y)))
        .filter(|c| c.in_arena())
}

/// Weighted count of opponent walls and turrets on `cells`.
fn weighted<B, I>(board: &B, cells: I, turret_weight: u32) -> u32
where
    B: Board + ?Sized,
    I: IntoIterator<Item = Coord>,
{
    cells
        .into_iter()
        .filter_map(|c| board.stationary_unit(c))
        .filter(|u| u.owner == Player::Opponent)
        .map(|u| match u.kind {
            UnitKind::Wall => 1,
            UnitKind::Turret => turret_weight,
            _ => 0,
        })
        .sum()
}

/// Score both halves and pick an attack.
#[must_use]
pub fn assess<B: Board + ?Sized>(board: &B, config: &StrategyConfig) -> ThreatReport {
    let weight = config.turret_weight;
    let corner = SideScores {
        left: weighted(board, corner_cells(Side::Left), weight),
        right: weighted(board, corner_cells(Side::Right), weight),
    };
    let half = SideScores {
        left: weighted(board, half_cells(Side::Left), weight),
        right: weighted(board, half_cells(Side::Right), weight),
    };

    let mut report = ThreatReport {
        corner,
        half,
        plan: AttackPlan::Conventional(Side::Left),
    };
    report.plan = if report.value_no_corner(Side::Right) <= config.exploit_threshold {
        AttackPlan::ExploitCorner(Side::Right)
    } else if report.value_no_corner(Side::Left) <= config.exploit_threshold {
        AttackPlan::ExploitCorner(Side::Left)
    } else if corner.left >= config.fortified_corner_threshold
        && corner.right >= config.fortified_corner_threshold
    {
        AttackPlan::ExploitCorner(half.lower())
    } else {
        AttackPlan::Conventional(corner.lower())
    };

    debug!(
        corner_left = corner.left,
        corner_right = corner.right,
        half_left = half.left,
        half_right = half.right,
        plan = %report.plan,
        "threat assessed"
    );
    report
}

/// Pick this turn's attack.
#[must_use]
pub fn choose_side<B: Board + ?Sized>(board: &B, config: &StrategyConfig) -> AttackPlan {
    assess(board, config).plan
}
