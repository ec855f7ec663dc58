#![no_main]

//! Full turn fuzzer.
//!
//! Builds an arbitrary opponent layout, plays a few frames of damage into the
//! history, then decides a turn. Checks that the plan stays inside our half
//! and never spends more than the board holds.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rampart::arena::{Request, Resource, StationaryUnit};
use rampart::replay::{ActionFrame, DamageEvent};
use rampart::{Board, Coord, Engine, GameConfig, GameState, Player, StrategyConfig, UnitKind};

/// A fuzzer-generated opponent structure.
#[derive(Arbitrary, Debug)]
struct FuzzStructure {
    x: u8,
    y: u8,
    turret: bool,
}

/// A fuzzer-generated hit on one of our structures.
#[derive(Arbitrary, Debug)]
struct FuzzHit {
    x: u8,
    y: u8,
    amount: u8,
    code: u8,
}

/// Structured input for one decided turn.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    turn: u8,
    cores: u16,
    bits: u8,
    stall: bool,
    seed: u64,
    structures: Vec<FuzzStructure>,
    hits: Vec<FuzzHit>,
}

fuzz_target!(|input: TurnInput| {
    let Ok(config) = GameConfig::sample() else {
        return;
    };
    let turn = u32::from(input.turn) + 1;
    let cores = f64::from(input.cores % 400);
    let bits = f64::from(input.bits % 60);

    let strategy = StrategyConfig {
        stall_with_interceptors: input.stall,
        ..StrategyConfig::default()
    };
    let mut engine = Engine::new(strategy, Some(input.seed));

    let damage: Vec<DamageEvent> = input
        .hits
        .iter()
        .take(32)
        .map(|h| DamageEvent {
            location: Coord::new(i32::from(h.x % 28), i32::from(h.y % 14)),
            amount: f64::from(h.amount),
            code: h.code % 8,
            owner: Player::Local,
        })
        .collect();
    engine.on_action_frame(&ActionFrame {
        turn: turn - 1,
        frame: 1,
        breaches: Vec::new(),
        damage,
    });

    let mut state = GameState::empty(&config, turn, cores, bits);
    for s in input.structures.iter().take(64) {
        let at = Coord::new(i32::from(s.x % 28), 14 + i32::from(s.y % 14));
        if at.in_arena() {
            let kind = if s.turret { UnitKind::Turret } else { UnitKind::Wall };
            state.place(StationaryUnit::new(kind, Player::Opponent, at, 60.0));
        }
    }

    engine.on_turn(&mut state).expect("first turn is never stale");

    assert!(state.resource(Resource::Cores) >= 0.0);
    assert!(state.resource(Resource::Bits) >= 0.0);
    let plan = state.plan();
    for request in plan.build.iter().chain(&plan.deploy) {
        let at = match *request {
            Request::Spawn { at, .. } | Request::Upgrade { at } | Request::Remove { at } => at,
        };
        assert!(at.in_arena() && at.is_friendly_half(), "request outside our half: {at}");
    }
});
