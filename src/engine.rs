//! Turn orchestration and match history.
//!
//! The host alternates between asking for a turn and streaming replay frames
//! of the turn being played out. [`Engine`] answers the former and learns from
//! the latter; what it learns lives in a [`MatchHistory`] that tests can build
//! directly.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::arena::{Board, Side};
use crate::config::StrategyConfig;
use crate::error::{RampartError, Result};
use crate::replay::ActionFrame;
use crate::strategy::{
    AttackPlan, BreachTracker, DamageLedger, DefenseBuilder, DefenseOutcome, LedgerFilter,
    Offense, launch, stall,
};

/// Everything remembered across turns of one match.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
    ledger: DamageLedger,
    breaches: BreachTracker,
}

impl MatchHistory {
    /// Empty history whose ledger keeps the events `filter` accepts.
    #[must_use]
    pub fn new(filter: LedgerFilter) -> Self {
        Self {
            ledger: DamageLedger::new(filter),
            breaches: BreachTracker::new(),
        }
    }

    /// Damage taken so far.
    #[must_use]
    pub fn ledger(&self) -> &DamageLedger {
        &self.ledger
    }

    /// Mutable ledger, for seeding scenarios.
    pub fn ledger_mut(&mut self) -> &mut DamageLedger {
        &mut self.ledger
    }

    /// Where the opponent has scored.
    #[must_use]
    pub fn breaches(&self) -> &BreachTracker {
        &self.breaches
    }

    /// Fold one replay frame in.
    pub fn record_frame(&mut self, frame: &ActionFrame) {
        self.breaches.on_breach_batch(&frame.breaches);
        self.ledger.record(frame.turn, &frame.damage);
    }
}

/// What the engine did on one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSummary {
    /// Turn number answered.
    pub turn: u32,
    /// The attack, if one was launched.
    pub offense: Option<Offense>,
    /// Interceptors spawned by the stall.
    pub interceptors: u32,
    /// The defense pass.
    pub defense: DefenseOutcome,
}

impl TurnSummary {
    /// The attack outcome chosen, if an attack was launched.
    #[must_use]
    pub fn attack(&self) -> Option<AttackPlan> {
        self.offense.map(|o| o.plan)
    }

    /// The side that got reactive turrets, if any.
    #[must_use]
    pub const fn reactive(&self) -> Option<Side> {
        self.defense.reactive
    }
}

/// The per-match decision engine.
#[derive(Debug)]
pub struct Engine {
    strategy: StrategyConfig,
    history: MatchHistory,
    rng: ChaCha8Rng,
    seed: u64,
    last_turn: Option<u32>,
}

impl Engine {
    /// Create an engine for a new match.
    ///
    /// The interceptor RNG is seeded from `seed`, else from the strategy file,
    /// else from entropy. The chosen seed is logged so the match can be replayed.
    #[must_use]
    pub fn new(strategy: StrategyConfig, seed: Option<u64>) -> Self {
        let history = MatchHistory::new(LedgerFilter::from(&strategy));
        Self::with_history(strategy, history, seed)
    }

    /// Create an engine that continues from existing history.
    #[must_use]
    pub fn with_history(
        strategy: StrategyConfig,
        history: MatchHistory,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.or(strategy.seed).unwrap_or_else(rand::random);
        info!(seed, "engine seeded");
        Self {
            strategy,
            history,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            last_turn: None,
        }
    }

    /// The seed in use.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tuning constants.
    #[must_use]
    pub const fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    /// History gathered so far.
    #[must_use]
    pub const fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Last turn answered.
    #[must_use]
    pub const fn last_turn(&self) -> Option<u32> {
        self.last_turn
    }

    /// Decide this turn: offense, then the optional interceptor stall, then defense.
    ///
    /// # Errors
    ///
    /// Returns [`RampartError::StaleTurn`] if the board's turn is not newer
    /// than the last one answered. Nothing is requested in that case.
    pub fn on_turn<B: Board + ?Sized>(&mut self, board: &mut B) -> Result<TurnSummary> {
        let turn = board.turn();
        if let Some(last) = self.last_turn
            && turn <= last
        {
            return Err(RampartError::StaleTurn {
                received: turn,
                last,
            });
        }
        self.last_turn = Some(turn);

        let offense = launch(board, &self.strategy);
        let interceptors = if self.strategy.stall_with_interceptors {
            stall(board, &mut self.rng)
        } else {
            0
        };
        let defense = DefenseBuilder::new(&self.strategy).build(board, &self.history.ledger);

        info!(
            turn,
            attack = ?offense.map(|o| o.plan),
            interceptors,
            reactive = ?defense.reactive,
            accepted = defense.accepted,
            "turn decided"
        );
        Ok(TurnSummary {
            turn,
            offense,
            interceptors,
            defense,
        })
    }

    /// Learn from one replay frame.
    pub fn on_action_frame(&mut self, frame: &ActionFrame) {
        debug!(
            turn = frame.turn,
            frame = frame.frame,
            breaches = frame.breaches.len(),
            damage = frame.damage.len(),
            "action frame"
        );
        self.history.record_frame(frame);
    }
}
