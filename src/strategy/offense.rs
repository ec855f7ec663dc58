//! Turning the threat verdict into mobile deployments.

use tracing::{debug, info};

use crate::arena::{Board, Coord, Edge, Side, UnitKind};
use crate::config::StrategyConfig;
use crate::strategy::path_risk::safest;
use crate::strategy::threat::{AttackPlan, choose_side};

const SCOUT_CELLS_LEFT: [Coord; 3] = [Coord::new(7, 6), Coord::new(5, 8), Coord::new(8, 5)];
const SCOUT_CELLS_RIGHT: [Coord; 3] = [Coord::new(20, 6), Coord::new(22, 8), Coord::new(19, 5)];

const DEMOLISHER_LEFT: Coord = Coord::new(6, 7);
const DEMOLISHER_RIGHT: Coord = Coord::new(21, 7);

const PLUG_FOR_LEFT: [Coord; 4] = [
    Coord::new(5, 13),
    Coord::new(4, 12),
    Coord::new(22, 11),
    Coord::new(24, 11),
];
const PLUG_FOR_RIGHT: [Coord; 4] = [
    Coord::new(22, 13),
    Coord::new(23, 12),
    Coord::new(5, 11),
    Coord::new(3, 11),
];

/// Candidate scout cells on a launch edge.
#[must_use]
pub const fn scout_cells(edge: Edge) -> &'static [Coord] {
    match edge {
        Edge::BottomLeft => &SCOUT_CELLS_LEFT,
        _ => &SCOUT_CELLS_RIGHT,
    }
}

/// Demolisher cell on a launch edge.
#[must_use]
pub const fn demolisher_cell(edge: Edge) -> Coord {
    match edge {
        Edge::BottomLeft => DEMOLISHER_LEFT,
        _ => DEMOLISHER_RIGHT,
    }
}

/// Temporary walls that steer this turn's path toward the corner on `side`.
#[must_use]
pub const fn corner_plug(side: Side) -> &'static [Coord] {
    match side {
        Side::Left => &PLUG_FOR_LEFT,
        Side::Right => &PLUG_FOR_RIGHT,
    }
}

/// Where an attack launches from.
///
/// Conventional attacks cross the board diagonally into the targeted corner,
/// so they start on the opposite bottom edge; exploits go straight up their own side.
#[must_use]
pub const fn launch_edge(plan: AttackPlan) -> Edge {
    match plan {
        AttackPlan::Conventional(side) => Edge::friendly(side.opposite()),
        AttackPlan::ExploitCorner(side) => Edge::friendly(side),
    }
}

/// What the offense requested this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offense {
    /// The attack carried out.
    pub plan: AttackPlan,
    /// Scout spawn cell.
    pub scouts_from: Coord,
    /// Scouts accepted.
    pub scouts: u32,
    /// Demolishers accepted.
    pub demolishers: u32,
}

/// Launch an attack if enough bits have been saved up.
///
/// Returns `None`, requesting nothing, while fewer than
/// `min_scouts_for_attack` scouts are affordable.
pub fn launch<B: Board + ?Sized>(board: &mut B, config: &StrategyConfig) -> Option<Offense> {
    let affordable = board.number_affordable(UnitKind::Scout);
    if affordable < config.min_scouts_for_attack {
        debug!(affordable, needed = config.min_scouts_for_attack, "saving bits");
        return None;
    }

    let plan = choose_side(board, config);
    let edge = launch_edge(plan);

    if let AttackPlan::Conventional(side) = plan {
        let plug = corner_plug(side);
        board.spawn(UnitKind::Wall, plug, 1);
        board.remove(plug);
    }

    let candidates = scout_cells(edge);
    let scouts_from = safest(board, candidates).or_else(|| candidates.first().copied())?;
    let scouts = board.spawn(UnitKind::Scout, &[scouts_from], config.scout_batch);
    let demolishers = board.spawn(
        UnitKind::Demolisher,
        &[demolisher_cell(edge)],
        config.demolisher_batch,
    );

    info!(%plan, %scouts_from, scouts, demolishers, "attack launched");
    Some(Offense {
        plan,
        scouts_from,
        scouts,
        demolishers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{GameState, Player, StationaryUnit};
    use crate::config::GameConfig;
    use crate::strategy::testing::{Call, RecordingBoard};

    #[test]
    fn test_spawn_tables_sit_on_their_edges() {
        for edge in [Edge::BottomLeft, Edge::BottomRight] {
            for c in scout_cells(edge) {
                assert!(edge.contains(*c), "{c}");
            }
            assert!(edge.contains(demolisher_cell(edge)));
        }
        for side in Side::BOTH {
            for c in corner_plug(side) {
                assert!(c.in_arena() && c.is_friendly_half());
            }
        }
    }

    #[test]
    fn test_plug_never_touches_the_defense() {
        use crate::strategy::defense::{
            PRIMARY_TURRETS, PRIMARY_WALLS, SECONDARY_TURRETS, SECONDARY_WALLS, SHIELD_CLUSTER,
            TERTIARY_TURRETS, TERTIARY_WALLS,
        };
        let defense: Vec<Coord> = PRIMARY_TURRETS
            .iter()
            .chain(&PRIMARY_WALLS)
            .chain(&SECONDARY_WALLS)
            .chain(&TERTIARY_WALLS)
            .chain(&SECONDARY_TURRETS)
            .chain(&TERTIARY_TURRETS)
            .chain(&SHIELD_CLUSTER)
            .copied()
            .collect();
        for side in Side::BOTH {
            for c in corner_plug(side) {
                assert!(!defense.contains(c), "plug cell {c} is part of the defense");
            }
        }
    }

    #[test]
    fn test_launch_edges() {
        assert_eq!(
            launch_edge(AttackPlan::Conventional(Side::Left)),
            Edge::BottomRight
        );
        assert_eq!(
            launch_edge(AttackPlan::Conventional(Side::Right)),
            Edge::BottomLeft
        );
        assert_eq!(
            launch_edge(AttackPlan::ExploitCorner(Side::Left)),
            Edge::BottomLeft
        );
        assert_eq!(
            launch_edge(AttackPlan::ExploitCorner(Side::Right)),
            Edge::BottomRight
        );
    }

    #[test]
    fn test_saves_below_threshold() {
        let config = GameConfig::sample().unwrap();
        let mut board = RecordingBoard::new(GameState::empty(&config, 5, 10.0, 15.0));
        assert!(launch(&mut board, &StrategyConfig::default()).is_none());
        assert!(board.calls.is_empty());
    }

    #[test]
    fn test_exploit_on_empty_board() {
        let config = GameConfig::sample().unwrap();
        let mut board = RecordingBoard::new(GameState::empty(&config, 5, 10.0, 16.0));
        let offense = launch(&mut board, &StrategyConfig::default()).unwrap();

        assert_eq!(offense.plan, AttackPlan::ExploitCorner(Side::Right));
        assert_eq!(offense.scouts_from, Coord::new(20, 6));
        assert_eq!(offense.scouts, 7);
        // 9 bits left after the scouts: three demolishers.
        assert_eq!(offense.demolishers, 3);
        assert!(board.spawns_of(UnitKind::Wall).is_empty());
        assert_eq!(board.inner.plan().deploy.len(), 10);
    }

    #[test]
    fn test_conventional_places_and_removes_plug() {
        let config = GameConfig::sample().unwrap();
        let mut state = GameState::empty(&config, 5, 10.0, 20.0);
        // Fill both halves enough that neither is exploitable; corners open.
        let mut placed = 0;
        'outer: for y in (18..28).rev() {
            for x in 0..28 {
                let c = Coord::new(x, y);
                if c.in_arena()
                    && state.place(StationaryUnit::new(UnitKind::Wall, Player::Opponent, c, 60.0))
                {
                    placed += 1;
                    if placed == 60 {
                        break 'outer;
                    }
                }
            }
        }
        let mut board = RecordingBoard::new(state);
        let offense = launch(&mut board, &StrategyConfig::default()).unwrap();
        assert_eq!(offense.plan, AttackPlan::Conventional(Side::Left));

        let plug = corner_plug(Side::Left).to_vec();
        assert_eq!(board.calls[0], Call::Spawn(UnitKind::Wall, plug.clone(), 1));
        assert_eq!(board.calls[1], Call::Remove(plug));
        assert!(SCOUT_CELLS_RIGHT.contains(&offense.scouts_from));
    }
}
