//! The capability interface between the decision layer and the board.

use crate::arena::{Coord, Player, Resource, StationaryUnit, UnitKind};

/// Everything the strategy may ask of, or request from, the board.
///
/// The strategy depends only on this trait. Requests are proposals: an
/// implementation silently skips a request whose cell is occupied or invalid
/// or that the current resources cannot pay for, and the strategy never checks
/// per-cell success.
pub trait Board {
    /// Current turn number.
    fn turn(&self) -> u32;

    /// Amount of a currency the local player holds right now.
    fn resource(&self, resource: Resource) -> f64;

    /// How many units of `kind` the local player could pay for right now.
    fn number_affordable(&self, kind: UnitKind) -> u32;

    /// The structure on a cell, if any.
    fn stationary_unit(&self, at: Coord) -> Option<StationaryUnit>;

    /// Structures hostile to `victim` whose attack reaches `at`.
    fn attackers(&self, at: Coord, victim: Player) -> Vec<StationaryUnit>;

    /// The cells a mobile unit spawned at `start` would walk, beginning with `start`.
    fn path_to_edge(&self, start: Coord) -> Option<Vec<Coord>>;

    /// Reference damage of a non-upgraded unit of `kind`.
    fn unit_damage(&self, kind: UnitKind) -> f64;

    /// Request up to `count` units of `kind` on each cell. Returns how many were accepted.
    fn spawn(&mut self, kind: UnitKind, cells: &[Coord], count: u32) -> u32;

    /// Request the upgrade of the local structures on `cells`. Returns how many were accepted.
    fn upgrade(&mut self, cells: &[Coord]) -> u32;

    /// Flag the local structures on `cells` for removal. Returns how many were accepted.
    fn remove(&mut self, cells: &[Coord]) -> u32;
}
