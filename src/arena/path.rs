//! Mobile unit pathing.
//!
//! A unit walks toward the edge opposite its spawn edge. If that edge cannot
//! be reached, it walks to the reachable cell that makes the most progress
//! toward it and stops there. Among equally short routes, the walker prefers
//! to advance vertically toward the target, then horizontally.
//!
//! The host's own tie-breaking alternates directions frame by frame; this
//! walker keeps a fixed preference, which is close enough for risk scoring.

use std::collections::VecDeque;

use crate::arena::{ARENA_SIZE, Coord, Edge, GameMap};

const CELLS: usize = (ARENA_SIZE * ARENA_SIZE) as usize;

#[allow(clippy::cast_sign_loss)]
fn idx(c: Coord) -> usize {
    (c.y * ARENA_SIZE + c.x) as usize
}

/// Breadth-first distances from a set of seed cells over unblocked cells.
fn distances(map: &GameMap, seeds: &[Coord], allowed: &[bool]) -> Vec<Option<u32>> {
    let mut dist = vec![None; CELLS];
    let mut queue = VecDeque::new();
    for &seed in seeds {
        if dist[idx(seed)].is_none() {
            dist[idx(seed)] = Some(0);
            queue.push_back(seed);
        }
    }
    while let Some(cell) = queue.pop_front() {
        let Some(d) = dist[idx(cell)] else { continue };
        for next in cell.neighbours() {
            if map.is_blocked(next) || !allowed[idx(next)] || dist[idx(next)].is_some() {
                continue;
            }
            dist[idx(next)] = Some(d + 1);
            queue.push_back(next);
        }
    }
    dist
}

/// Vertical and horizontal step directions toward a target edge.
const fn heading(target: Edge) -> (i32, i32) {
    match target {
        Edge::TopLeft => (-1, 1),
        Edge::TopRight => (1, 1),
        Edge::BottomLeft => (-1, -1),
        Edge::BottomRight => (1, -1),
    }
}

/// Progress score of a cell toward a target edge; higher is further along.
fn progress(c: Coord, target: Edge) -> (i32, i32) {
    let (dx, dy) = heading(target);
    (c.y * dy, c.x * dx)
}

/// Compute the path from `start` toward `target`.
///
/// The returned path begins with `start`. Returns `None` if `start` is off the
/// arena or occupied by a structure.
#[must_use]
pub fn path_to_edge(map: &GameMap, start: Coord, target: Edge) -> Option<Vec<Coord>> {
    if map.is_blocked(start) {
        return None;
    }

    let everywhere = vec![true; CELLS];
    let from_start = distances(map, &[start], &everywhere);
    let reachable: Vec<bool> = from_start.iter().map(Option::is_some).collect();

    let mut goals: Vec<Coord> = target
        .cells()
        .into_iter()
        .filter(|c| reachable[idx(*c)])
        .collect();

    if goals.is_empty() {
        // Self-destruct target: the deepest reachable cell toward the edge.
        let deepest = (0..ARENA_SIZE)
            .flat_map(|y| (0..ARENA_SIZE).map(move |x| Coord::new(x, y)))
            .filter(|c| c.in_arena() && reachable[idx(*c)])
            .max_by_key(|c| progress(*c, target))?;
        goals.push(deepest);
    }

    let to_goal = distances(map, &goals, &reachable);
    let (step_x, step_y) = heading(target);
    let preferred = [
        (0, step_y),
        (step_x, 0),
        (-step_x, 0),
        (0, -step_y),
    ];

    let mut path = vec![start];
    let mut current = start;
    while let Some(d) = to_goal[idx(current)].filter(|d| *d > 0) {
        let next = preferred
            .iter()
            .map(|(dx, dy)| Coord::new(current.x + dx, current.y + dy))
            .find(|c| c.in_arena() && to_goal[idx(*c)] == Some(d - 1))?;
        path.push(next);
        current = next;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Player, StationaryUnit, UnitKind};

    #[test]
    fn test_open_board_reaches_target_edge() {
        let map = GameMap::new();
        let start = Coord::new(13, 0);
        let path = path_to_edge(&map, start, Edge::TopRight).unwrap();
        assert_eq!(path[0], start);
        assert!(Edge::TopRight.contains(*path.last().unwrap()));
        for pair in path.windows(2) {
            assert!((pair[0].distance(pair[1]) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_blocked_start_has_no_path() {
        let mut map = GameMap::new();
        map.place(StationaryUnit::new(
            UnitKind::Wall,
            Player::Local,
            Coord::new(7, 6),
            60.0,
        ));
        assert!(path_to_edge(&map, Coord::new(7, 6), Edge::TopRight).is_none());
        assert!(path_to_edge(&map, Coord::new(0, 0), Edge::TopRight).is_none());
    }

    #[test]
    fn test_walled_off_unit_stops_at_deepest_cell() {
        let mut map = GameMap::new();
        // Seal row 13 completely; nothing on the friendly half can cross.
        for x in 0..ARENA_SIZE {
            map.place(StationaryUnit::new(
                UnitKind::Wall,
                Player::Local,
                Coord::new(x, 13),
                60.0,
            ));
        }
        let path = path_to_edge(&map, Coord::new(13, 0), Edge::TopRight).unwrap();
        let end = *path.last().unwrap();
        assert_eq!(end.y, 12);
        assert!(path.iter().all(|c| c.y < 13));
    }

    #[test]
    fn test_path_routes_around_structure() {
        let mut map = GameMap::new();
        map.place(StationaryUnit::new(
            UnitKind::Wall,
            Player::Local,
            Coord::new(13, 1),
            60.0,
        ));
        let path = path_to_edge(&map, Coord::new(13, 0), Edge::TopRight).unwrap();
        assert!(!path.contains(&Coord::new(13, 1)));
        assert!(Edge::TopRight.contains(*path.last().unwrap()));
    }
}
