//! Log of where the opponent scored on us.

use crate::arena::{Coord, Player};
use crate::replay::BreachEvent;

/// Append-only record of opponent breach locations, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachTracker {
    locations: Vec<Coord>,
}

impl BreachTracker {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the location of every opponent-owned breach. Returns how many were kept.
    pub fn on_breach_batch(&mut self, events: &[BreachEvent]) -> usize {
        let before = self.locations.len();
        self.locations.extend(
            events
                .iter()
                .filter(|e| e.owner == Player::Opponent)
                .map(|e| e.location),
        );
        self.locations.len() - before
    }

    /// Every logged location, oldest first.
    #[must_use]
    pub fn locations(&self) -> &[Coord] {
        &self.locations
    }

    /// Number of logged breaches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the opponent has not scored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breach(x: i32, y: i32, owner: Player) -> BreachEvent {
        BreachEvent {
            location: Coord::new(x, y),
            amount: 1.0,
            code: 3,
            owner,
        }
    }

    #[test]
    fn test_keeps_opponent_breaches_in_order() {
        let mut tracker = BreachTracker::new();
        let kept = tracker.on_breach_batch(&[
            breach(0, 13, Player::Opponent),
            breach(14, 27, Player::Local),
            breach(27, 13, Player::Opponent),
        ]);
        assert_eq!(kept, 2);
        tracker.on_breach_batch(&[breach(1, 12, Player::Opponent)]);
        assert_eq!(
            tracker.locations(),
            &[Coord::new(0, 13), Coord::new(27, 13), Coord::new(1, 12)]
        );
    }

    #[test]
    fn test_empty_batch() {
        let mut tracker = BreachTracker::new();
        assert_eq!(tracker.on_breach_batch(&[]), 0);
        assert!(tracker.is_empty());
    }
}
