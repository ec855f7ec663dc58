//! Spending leftover bits on a random interceptor screen.

use rand::Rng;
use tracing::debug;

use crate::arena::{Board, Coord, Edge, UnitKind};

/// Most interceptors one stall may request.
pub const MAX_STALL: u32 = 64;

/// Friendly edge cells not covered by a structure.
fn open_launch_cells<B: Board + ?Sized>(board: &B) -> Vec<Coord> {
    [Edge::BottomLeft, Edge::BottomRight]
        .into_iter()
        .flat_map(Edge::cells)
        .filter(|c| board.stationary_unit(*c).is_none())
        .collect()
}

/// Spawn interceptors one at a time at random open edge cells until bits run
/// out or [`MAX_STALL`] have been sent.
///
/// Returns how many were accepted.
pub fn stall<B, R>(board: &mut B, rng: &mut R) -> u32
where
    B: Board + ?Sized,
    R: Rng,
{
    let cells = open_launch_cells(board);
    if cells.is_empty() {
        return 0;
    }

    let budget = board.number_affordable(UnitKind::Interceptor).min(MAX_STALL);
    let mut spawned = 0;
    while spawned < budget && board.number_affordable(UnitKind::Interceptor) > 0 {
        let at = cells[rng.gen_range(0..cells.len())];
        if board.spawn(UnitKind::Interceptor, &[at], 1) == 0 {
            break;
        }
        spawned += 1;
    }
    debug!(spawned, "interceptor stall");
    spawned
}
