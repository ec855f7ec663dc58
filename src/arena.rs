//! Arena layer.
//!
//! Everything the decision layer needs to know about the board, behind the
//! [`Board`] trait, plus a reference implementation over decoded turn
//! snapshots:
//! - Coordinates, halves, and edges of the diamond arena
//! - Unit kinds, owners, and currencies
//! - An occupancy grid of structures
//! - Pathing toward the far edge
//! - Request validation against the local purse

mod board;
mod coord;
mod map;
mod path;
mod state;
mod units;

pub use board::Board;
pub use coord::{ARENA_SIZE, Coord, Edge, HALF_ARENA, Side};
pub use map::GameMap;
pub use path::path_to_edge;
pub use state::{GameState, Plan, PlayerStats, Request};
pub use units::{Player, REMOVE_CODE, Resource, StationaryUnit, UPGRADE_CODE, UnitKind};
