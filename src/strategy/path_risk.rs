//! Exposure of deployment cells to hostile turrets.

use tracing::debug;

use crate::arena::{Board, Coord, Player, UnitKind};

/// Expected punishment for walking the path out of `start`.
///
/// Every path cell contributes the number of opponent structures able to hit
/// it times the reference turret damage. `None` if no path exists.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn path_risk<B: Board + ?Sized>(board: &B, start: Coord) -> Option<f64> {
    let path = board.path_to_edge(start)?;
    let turret_damage = board.unit_damage(UnitKind::Turret);
    let risk = path
        .iter()
        .map(|cell| board.attackers(*cell, Player::Local).len() as f64 * turret_damage)
        .sum();
    Some(risk)
}

/// The candidate whose path takes the least turret fire.
///
/// Ties go to the earliest candidate. Candidates without a path are skipped,
/// so the result is `None` only when no candidate has one.
#[must_use]
pub fn safest<B: Board + ?Sized>(board: &B, candidates: &[Coord]) -> Option<Coord> {
    let mut best: Option<(Coord, f64)> = None;
    for &start in candidates {
        let Some(risk) = path_risk(board, start) else {
            debug!(%start, "no path, skipping candidate");
            continue;
        };
        debug!(%start, risk, "scored deployment cell");
        if best.is_none_or(|(_, lowest)| risk < lowest) {
            best = Some((start, risk));
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{GameState, StationaryUnit};
    use crate::config::GameConfig;

    fn hostile_turret(x: i32, y: i32) -> StationaryUnit {
        StationaryUnit::new(UnitKind::Turret, Player::Opponent, Coord::new(x, y), 75.0)
    }

    #[test]
    fn test_empty_input() {
        let config = GameConfig::sample().unwrap();
        let state = GameState::empty(&config, 0, 0.0, 0.0);
        assert_eq!(safest(&state, &[]), None);
    }

    #[test]
    fn test_single_candidate_returns_itself() {
        let config = GameConfig::sample().unwrap();
        let state = GameState::empty(&config, 0, 0.0, 0.0);
        assert_eq!(safest(&state, &[Coord::new(7, 6)]), Some(Coord::new(7, 6)));
    }

    #[test]
    fn test_equal_scores_return_first() {
        let config = GameConfig::sample().unwrap();
        let state = GameState::empty(&config, 0, 0.0, 0.0);
        let candidates = [Coord::new(20, 6), Coord::new(7, 6)];
        assert_eq!(safest(&state, &candidates), Some(Coord::new(20, 6)));
    }

    #[test]
    fn test_prefers_the_unguarded_side() {
        let config = GameConfig::sample().unwrap();
        let mut state = GameState::empty(&config, 0, 0.0, 0.0);
        // The left launch walks straight up column 7 first; line it with turrets.
        for (x, y) in [(6, 16), (6, 18), (6, 20), (8, 18)] {
            state.place(hostile_turret(x, y));
        }
        let left = Coord::new(7, 6);
        let right = Coord::new(20, 6);
        assert!(path_risk(&state, left).unwrap() > path_risk(&state, right).unwrap());
        assert_eq!(safest(&state, &[left, right]), Some(right));
    }

    #[test]
    fn test_blocked_candidate_is_skipped() {
        let config = GameConfig::sample().unwrap();
        let mut state = GameState::empty(&config, 0, 0.0, 0.0);
        state.place(StationaryUnit::new(
            UnitKind::Wall,
            Player::Local,
            Coord::new(7, 6),
            60.0,
        ));
        assert_eq!(path_risk(&state, Coord::new(7, 6)), None);
        assert_eq!(
            safest(&state, &[Coord::new(7, 6), Coord::new(20, 6)]),
            Some(Coord::new(20, 6))
        );
    }
}
