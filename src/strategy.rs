//! The decision layer.
//!
//! Everything here talks to the board through [`Board`](crate::arena::Board)
//! only, and is deterministic for a given board and history, with the single
//! exception of the interceptor stall, which draws from an injected RNG.
//!
//! - [`ledger`]: damage taken per turn and side, read over a rolling window
//! - [`breach`]: where the opponent scored
//! - [`path_risk`]: which deployment cell walks through the least fire
//! - [`threat`]: which half to attack, and how
//! - [`defense`]: the tiered layout and reactive turrets
//! - [`offense`]: scouts, demolishers, and corner plugs
//! - [`interceptors`]: the optional random interceptor screen

pub mod breach;
pub mod defense;
pub mod interceptors;
pub mod ledger;
pub mod offense;
pub mod path_risk;
pub mod threat;

#[cfg(test)]
pub(crate) mod testing;

pub use breach::BreachTracker;
pub use defense::{DefenseBuilder, DefenseOutcome, reinforce};
pub use interceptors::stall;
pub use ledger::{DamageLedger, LedgerFilter, SideDamage};
pub use offense::{Offense, launch};
pub use path_risk::{path_risk, safest};
pub use threat::{AttackPlan, SideScores, ThreatReport, assess, choose_side};
