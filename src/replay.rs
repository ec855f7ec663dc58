//! Replay data from the host.
//!
//! Between two turn snapshots the host streams action frames describing what
//! happened while units moved: who scored, who took damage. This module
//! decodes them for the engine's history, and renders boards for humans
//! inspecting a turn offline.

mod frame;
mod render;

pub use frame::{ActionFrame, BreachEvent, DamageEvent};
pub use render::render_ascii;
