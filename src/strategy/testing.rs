//! A board that remembers every request made of it.

use crate::arena::{Board, Coord, GameState, Player, Resource, StationaryUnit, UnitKind};

/// One request as the strategy issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Spawn(UnitKind, Vec<Coord>, u32),
    Upgrade(Vec<Coord>),
    Remove(Vec<Coord>),
}

/// Wraps a [`GameState`], forwarding everything and logging mutations in order.
#[derive(Debug)]
pub(crate) struct RecordingBoard<'a> {
    pub(crate) inner: GameState<'a>,
    pub(crate) calls: Vec<Call>,
}

impl<'a> RecordingBoard<'a> {
    pub(crate) fn new(inner: GameState<'a>) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    /// Spawn calls for one kind, in order.
    pub(crate) fn spawns_of(&self, kind: UnitKind) -> Vec<&[Coord]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Spawn(k, cells, _) if *k == kind => Some(cells.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl Board for RecordingBoard<'_> {
    fn turn(&self) -> u32 {
        self.inner.turn()
    }

    fn resource(&self, resource: Resource) -> f64 {
        self.inner.resource(resource)
    }

    fn number_affordable(&self, kind: UnitKind) -> u32 {
        self.inner.number_affordable(kind)
    }

    fn stationary_unit(&self, at: Coord) -> Option<StationaryUnit> {
        self.inner.stationary_unit(at)
    }

    fn attackers(&self, at: Coord, victim: Player) -> Vec<StationaryUnit> {
        self.inner.attackers(at, victim)
    }

    fn path_to_edge(&self, start: Coord) -> Option<Vec<Coord>> {
        self.inner.path_to_edge(start)
    }

    fn unit_damage(&self, kind: UnitKind) -> f64 {
        self.inner.unit_damage(kind)
    }

    fn spawn(&mut self, kind: UnitKind, cells: &[Coord], count: u32) -> u32 {
        self.calls.push(Call::Spawn(kind, cells.to_vec(), count));
        self.inner.spawn(kind, cells, count)
    }

    fn upgrade(&mut self, cells: &[Coord]) -> u32 {
        self.calls.push(Call::Upgrade(cells.to_vec()));
        self.inner.upgrade(cells)
    }

    fn remove(&mut self, cells: &[Coord]) -> u32 {
        self.calls.push(Call::Remove(cells.to_vec()));
        self.inner.remove(cells)
    }
}
