//! Coordinates, halves, and edges of the diamond arena.

use serde::{Deserialize, Serialize};

/// Width and height of the arena in cells.
pub const ARENA_SIZE: i32 = 28;

/// Half of [`ARENA_SIZE`]; the midline between halves and between owners.
pub const HALF_ARENA: i32 = ARENA_SIZE / 2;

/// A cell on the arena.
///
/// Serialized as a two-element `[x, y]` array, which is how the host writes
/// locations in both turn snapshots and action frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    /// X coordinate (column), 0 at the left corner.
    pub x: i32,
    /// Y coordinate (row), 0 at the local player's back edge.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if the cell lies inside the playable diamond.
    #[must_use]
    pub const fn in_arena(self) -> bool {
        let (x, y) = (self.x, self.y);
        if y < 0 || y >= ARENA_SIZE || x < 0 || x >= ARENA_SIZE {
            return false;
        }
        let row = if y < HALF_ARENA { y } else { ARENA_SIZE - 1 - y };
        let start = HALF_ARENA - 1 - row;
        x >= start && x <= ARENA_SIZE - 1 - start
    }

    /// Which half of the board this cell belongs to.
    #[must_use]
    pub const fn side(self) -> Side {
        if self.x < HALF_ARENA {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Whether the cell is on the local player's half (rows below the midline).
    #[must_use]
    pub const fn is_friendly_half(self) -> bool {
        self.y < HALF_ARENA
    }

    /// Orthogonal neighbours that are inside the arena.
    #[must_use]
    #[inline]
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        [(0, 1), (0, -1), (-1, 0), (1, 0)]
            .into_iter()
            .map(move |(dx, dy)| Coord::new(self.x + dx, self.y + dy))
            .filter(|c| c.in_arena())
    }

    /// Euclidean distance to another cell.
    #[must_use]
    pub fn distance(self, other: Coord) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Mirror across the vertical midline.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self::new(ARENA_SIZE - 1 - self.x, self.y)
    }
}

impl From<[i32; 2]> for Coord {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for [i32; 2] {
    fn from(c: Coord) -> Self {
        [c.x, c.y]
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Left or right half of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Cells with `x < 14`.
    Left,
    /// Cells with `x >= 14`.
    Right,
}

impl Side {
    /// The other half.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One of the four diagonal edges of the diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Opponent's upper-left edge.
    TopLeft,
    /// Opponent's upper-right edge.
    TopRight,
    /// Local player's lower-left edge.
    BottomLeft,
    /// Local player's lower-right edge.
    BottomRight,
}

impl Edge {
    /// The edge a unit spawned on this edge walks toward.
    #[must_use]
    pub const fn target(self) -> Self {
        match self {
            Edge::TopLeft => Edge::BottomRight,
            Edge::TopRight => Edge::BottomLeft,
            Edge::BottomLeft => Edge::TopRight,
            Edge::BottomRight => Edge::TopLeft,
        }
    }

    /// The local player's launch edge on a side.
    #[must_use]
    pub const fn friendly(side: Side) -> Self {
        match side {
            Side::Left => Edge::BottomLeft,
            Side::Right => Edge::BottomRight,
        }
    }

    /// Cells on this edge, ordered from the arena's outer corner inward.
    #[must_use]
    pub fn cells(self) -> Vec<Coord> {
        (0..HALF_ARENA)
            .map(|i| match self {
                Edge::TopLeft => Coord::new(HALF_ARENA - 1 - i, ARENA_SIZE - 1 - i),
                Edge::TopRight => Coord::new(HALF_ARENA + i, ARENA_SIZE - 1 - i),
                Edge::BottomLeft => Coord::new(HALF_ARENA - 1 - i, i),
                Edge::BottomRight => Coord::new(HALF_ARENA + i, i),
            })
            .collect()
    }

    /// Check if a cell lies on this edge.
    #[must_use]
    pub const fn contains(self, c: Coord) -> bool {
        match self {
            Edge::TopLeft => c.y - c.x == HALF_ARENA && c.x >= 0 && c.x < HALF_ARENA,
            Edge::TopRight => c.x + c.y == ARENA_SIZE - 1 + HALF_ARENA && c.x >= HALF_ARENA,
            Edge::BottomLeft => c.x + c.y == HALF_ARENA - 1 && c.y >= 0 && c.x >= 0,
            Edge::BottomRight => c.x - c.y == HALF_ARENA && c.y >= 0 && c.y < HALF_ARENA,
        }
    }

    /// The edge a cell lies on, if any. Corner cells report the bottom or top edge first.
    #[must_use]
    pub fn of(c: Coord) -> Option<Self> {
        [Edge::BottomLeft, Edge::BottomRight, Edge::TopLeft, Edge::TopRight]
            .into_iter()
            .find(|e| e.contains(c))
    }
}
