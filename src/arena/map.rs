//! Occupancy grid of stationary units.

use crate::arena::{ARENA_SIZE, Coord, StationaryUnit};

const CELLS: usize = (ARENA_SIZE * ARENA_SIZE) as usize;

/// The arena's structures, one slot per cell.
#[derive(Debug, Clone)]
pub struct GameMap {
    /// Slots stored in row-major order.
    cells: Vec<Option<StationaryUnit>>,
}

impl Default for GameMap {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![None; CELLS],
        }
    }

    /// Convert a coordinate to an index into the slot array.
    #[allow(clippy::cast_sign_loss)]
    fn index(coord: Coord) -> Option<usize> {
        if coord.in_arena() {
            Some((coord.y * ARENA_SIZE + coord.x) as usize)
        } else {
            None
        }
    }

    /// The structure on a cell, if any.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&StationaryUnit> {
        Self::index(coord).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mutable access to the structure on a cell.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut StationaryUnit> {
        Self::index(coord).and_then(|idx| self.cells[idx].as_mut())
    }

    /// Whether a mobile unit cannot enter the cell.
    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        !coord.in_arena() || self.get(coord).is_some()
    }

    /// Put a structure on its cell.
    ///
    /// Returns `false` if the cell is outside the arena or already occupied.
    pub fn place(&mut self, unit: StationaryUnit) -> bool {
        let Some(idx) = Self::index(unit.location) else {
            return false;
        };
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(unit);
        true
    }

    /// Iterate over all structures.
    pub fn units(&self) -> impl Iterator<Item = &StationaryUnit> {
        self.cells.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Player, UnitKind};

    fn wall(x: i32, y: i32, owner: Player) -> StationaryUnit {
        StationaryUnit::new(UnitKind::Wall, owner, Coord::new(x, y), 60.0)
    }

    #[test]
    fn test_place_and_get() {
        let mut map = GameMap::new();
        assert!(map.place(wall(3, 13, Player::Local)));
        assert_eq!(map.get(Coord::new(3, 13)).unwrap().kind, UnitKind::Wall);
        assert!(map.is_blocked(Coord::new(3, 13)));
        assert!(!map.is_blocked(Coord::new(4, 13)));
    }

    #[test]
    fn test_place_rejects_occupied_and_outside() {
        let mut map = GameMap::new();
        assert!(map.place(wall(3, 13, Player::Local)));
        assert!(!map.place(wall(3, 13, Player::Opponent)));
        assert!(!map.place(wall(0, 0, Player::Local)));
        assert!(map.is_blocked(Coord::new(0, 0)));
    }

    #[test]
    fn test_units_iterates_every_owner() {
        let mut map = GameMap::new();
        map.place(wall(3, 13, Player::Local));
        map.place(wall(3, 14, Player::Opponent));
        assert_eq!(map.units().count(), 2);
        assert_eq!(map.units().filter(|u| u.owner == Player::Opponent).count(), 1);
    }
}
