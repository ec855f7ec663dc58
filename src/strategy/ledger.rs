//! Rolling record of damage taken by our structures, per side.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use tracing::warn;

use crate::arena::{Player, Side};
use crate::config::StrategyConfig;
use crate::replay::DamageEvent;

/// Damage summed separately for the two halves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SideDamage {
    /// Damage on `x < 14`.
    pub left: f64,
    /// Damage on `x >= 14`.
    pub right: f64,
}

impl SideDamage {
    /// Both halves together.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.left + self.right
    }

    /// Damage on one half.
    #[must_use]
    pub const fn on(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The half that took strictly more damage; ties go right.
    #[must_use]
    pub fn heavier(&self) -> Side {
        if self.left > self.right {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl Add for SideDamage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

impl AddAssign for SideDamage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Which damage events count toward the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Events with a type code at or above this are ignored.
    pub code_threshold: u8,
    /// Events at or behind this row are ignored.
    pub front_row_cutoff: i32,
}

impl Default for LedgerFilter {
    fn default() -> Self {
        Self::from(&StrategyConfig::default())
    }
}

impl From<&StrategyConfig> for LedgerFilter {
    fn from(config: &StrategyConfig) -> Self {
        Self {
            code_threshold: config.damage_code_threshold,
            front_row_cutoff: config.front_row_cutoff,
        }
    }
}

impl LedgerFilter {
    /// Whether an event is damage to one of our front structures.
    #[must_use]
    pub fn accepts(&self, event: &DamageEvent) -> bool {
        event.owner == Player::Local
            && event.code < self.code_threshold
            && event.location.y > self.front_row_cutoff
    }
}

/// Turn-indexed damage history.
///
/// The newest turn stays open while its frames arrive; recording a later
/// turn seals every earlier one for good.
#[derive(Debug, Clone, Default)]
pub struct DamageLedger {
    filter: LedgerFilter,
    entries: BTreeMap<u32, SideDamage>,
}

impl DamageLedger {
    /// An empty ledger with the given event filter.
    #[must_use]
    pub fn new(filter: LedgerFilter) -> Self {
        Self {
            filter,
            entries: BTreeMap::new(),
        }
    }

    /// Add a batch of events to `turn`.
    ///
    /// Returns `false`, leaving the ledger untouched, if `turn` is already sealed.
    pub fn record(&mut self, turn: u32, events: &[DamageEvent]) -> bool {
        if let Some(latest) = self.latest_turn()
            && turn < latest
        {
            warn!(turn, latest, "ignoring damage for a sealed turn");
            return false;
        }

        let mut sums = SideDamage::default();
        for event in events.iter().filter(|e| self.filter.accepts(e)) {
            match event.location.side() {
                Side::Left => sums.left += event.amount,
                Side::Right => sums.right += event.amount,
            }
        }
        *self.entries.entry(turn).or_default() += sums;
        true
    }

    /// Sum of the entries for turns `turn - window ..= turn - 1`.
    #[must_use]
    pub fn rolling_total(&self, turn: u32, window: u32) -> SideDamage {
        self.entries
            .range(turn.saturating_sub(window)..turn)
            .fold(SideDamage::default(), |acc, (_, d)| acc + *d)
    }

    /// The entry for one turn.
    #[must_use]
    pub fn get(&self, turn: u32) -> Option<SideDamage> {
        self.entries.get(&turn).copied()
    }

    /// The newest turn with an entry.
    #[must_use]
    pub fn latest_turn(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Number of turns recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, SideDamage)> + '_ {
        self.entries.iter().map(|(t, d)| (*t, *d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Coord;

    fn hit(x: i32, y: i32, amount: f64) -> DamageEvent {
        DamageEvent {
            location: Coord::new(x, y),
            amount,
            code: 2,
            owner: Player::Local,
        }
    }

    #[test]
    fn test_filter_owner_code_and_row() {
        let filter = LedgerFilter::default();
        assert!(filter.accepts(&hit(3, 12, 1.0)));
        assert!(!filter.accepts(&hit(3, 6, 1.0)));
        assert!(!filter.accepts(&DamageEvent {
            owner: Player::Opponent,
            ..hit(3, 12, 1.0)
        }));
        assert!(!filter.accepts(&DamageEvent {
            code: 3,
            ..hit(3, 12, 1.0)
        }));
    }

    #[test]
    fn test_record_buckets_by_side() {
        let mut ledger = DamageLedger::default();
        assert!(ledger.record(2, &[hit(3, 12, 4.0), hit(24, 12, 1.5), hit(13, 7, 2.0)]));
        let entry = ledger.get(2).unwrap();
        assert!((entry.left - 6.0).abs() < f64::EPSILON);
        assert!((entry.right - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_open_turn_accumulates_then_seals() {
        let mut ledger = DamageLedger::default();
        ledger.record(1, &[hit(3, 12, 1.0)]);
        ledger.record(1, &[hit(3, 12, 2.0)]);
        assert!((ledger.get(1).unwrap().left - 3.0).abs() < f64::EPSILON);

        ledger.record(2, &[]);
        assert!(!ledger.record(1, &[hit(3, 12, 100.0)]));
        assert!((ledger.get(1).unwrap().left - 3.0).abs() < f64::EPSILON);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_rolling_total_window() {
        let mut ledger = DamageLedger::default();
        for turn in 0..8 {
            ledger.record(turn, &[hit(3, 12, f64::from(turn)), hit(20, 12, 1.0)]);
        }
        // Turns 3..=7.
        let total = ledger.rolling_total(8, 5);
        assert!((total.left - 25.0).abs() < f64::EPSILON);
        assert!((total.right - 5.0).abs() < f64::EPSILON);

        // Shorter history than the window.
        let early = ledger.rolling_total(2, 5);
        assert!((early.left - 1.0).abs() < f64::EPSILON);
        assert!((early.right - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rolling_total_turn_zero_is_empty() {
        let mut ledger = DamageLedger::default();
        assert_eq!(ledger.rolling_total(0, 5), SideDamage::default());
        ledger.record(0, &[hit(3, 12, 9.0)]);
        assert_eq!(ledger.rolling_total(0, 5), SideDamage::default());
    }

    #[test]
    fn test_heavier_ties_go_right() {
        let even = SideDamage {
            left: 10.0,
            right: 10.0,
        };
        assert_eq!(even.heavier(), Side::Right);
        let left = SideDamage {
            left: 11.0,
            right: 10.0,
        };
        assert_eq!(left.heavier(), Side::Left);
    }
}
