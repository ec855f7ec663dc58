#![no_main]

//! Host channel fuzzer.
//!
//! Feeds arbitrary bytes after a valid config line. The session must finish
//! without error and answer every turn it counted with exactly two lines.

use libfuzzer_sys::fuzz_target;
use rampart::config::SAMPLE_GAME_CONFIG;
use rampart::protocol;
use rampart::{Engine, StrategyConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut input = SAMPLE_GAME_CONFIG.replace('\n', " ");
    input.push('\n');
    input.push_str(text);

    let mut engine = Engine::new(StrategyConfig::default(), Some(7));
    let mut out = Vec::new();
    let stats = protocol::run(&mut engine, input.as_bytes(), &mut out)
        .expect("a session over valid UTF-8 never fails");

    let answered = out.iter().filter(|&&b| b == b'\n').count();
    assert_eq!(answered, 2 * (stats.turns + stats.skipped_turns) as usize);
});
