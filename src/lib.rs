// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Rampart: a turn-based decision engine for two-player tower-defense matches.
//!
//! Each turn the engine reads the board, decides which structures to build or
//! upgrade and which mobile units to send where, and hands back a plan. Between
//! turns it reads replay frames to learn where it is being hurt.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Protocol loop (stdin / stdout)    │
//! ├─────────────────────────────────────┤
//! │   Engine + MatchHistory             │
//! ├─────────────────────────────────────┤
//! │   Strategy (threat, defense, ...)   │
//! ├───────────────── Board ─────────────┤
//! │   Arena (map, paths, purse)         │
//! └─────────────────────────────────────┘
//! ```
//!
//! The strategy layer depends on the [`Board`] trait only; [`GameState`] is
//! the implementation backed by the host's turn snapshots.

pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod replay;
pub mod strategy;

pub use error::{RampartError, Result};

// Re-export key types at crate root for convenience
pub use arena::{Board, Coord, GameState, Plan, Player, Side, UnitKind};
pub use config::{GameConfig, StrategyConfig};
pub use engine::{Engine, MatchHistory, TurnSummary};
pub use strategy::AttackPlan;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_plays_a_turn_from_the_root_api() {
        let config = GameConfig::sample().unwrap();
        let mut engine = Engine::new(StrategyConfig::default(), Some(1));
        let mut state = GameState::empty(&config, 0, 12.0, 0.0);
        let summary = engine.on_turn(&mut state).unwrap();
        assert_eq!(summary.turn, 0);
        assert!(!state.plan().is_empty());
    }
}
