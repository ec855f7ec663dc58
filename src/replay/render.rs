//! ASCII renderer for terminal viewing with optional ANSI colors.

use crate::arena::{ARENA_SIZE, Board, Coord, GameState, Player, Request, Resource, UnitKind};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";

/// ANSI colors for the local player and the opponent.
const PLAYER_COLORS: [&str; 2] = ["\x1b[34m", "\x1b[31m"];

fn glyph(kind: UnitKind) -> char {
    match kind {
        UnitKind::Wall => 'W',
        UnitKind::Shield => 'S',
        UnitKind::Turret => 'T',
        UnitKind::Scout => 'p',
        UnitKind::Demolisher => 'e',
        UnitKind::Interceptor => 'i',
    }
}

/// Render a board and its pending plan.
///
/// Output format:
/// ```text
/// Turn 4   cores 25.5  bits 9.0   (opponent: hp 28  cores 10.0  bits 5.0)
///                            . .
///                          . w . .
///                             ...
/// W . . T . . . . . . . . . . . . . . . . . . . . . . . W
///
/// Legend: W=Wall S=Shield T=Turret  UPPER=ours lower=theirs  +=upgraded  x=removing
/// Plan: 12 build, 7 deploy
/// ```
#[must_use]
pub fn render_ascii(state: &GameState<'_>, color: bool) -> String {
    let mut output = String::new();
    render_header(&mut output, state);
    render_map(&mut output, state, color);
    output.push_str(
        "\nLegend: W=Wall S=Shield T=Turret  UPPER=ours lower=theirs  +=upgraded  x=removing\n",
    );
    render_plan(&mut output, state);
    output
}

fn render_header(output: &mut String, state: &GameState<'_>) {
    let them = state.stats(Player::Opponent);
    output.push_str(&format!(
        "Turn {}   cores {:.1}  bits {:.1}   (opponent: hp {:.0}  cores {:.1}  bits {:.1})\n",
        state.turn(),
        state.resource(Resource::Cores),
        state.resource(Resource::Bits),
        them.health,
        them.cores,
        them.bits,
    ));
}

fn render_map(output: &mut String, state: &GameState<'_>, color: bool) {
    for y in (0..ARENA_SIZE).rev() {
        let mut line = String::new();
        for x in 0..ARENA_SIZE {
            let coord = Coord::new(x, y);
            if !coord.in_arena() {
                line.push_str("  ");
                continue;
            }
            let Some(unit) = state.map().get(coord) else {
                if color {
                    line.push_str(GRAY);
                    line.push('.');
                    line.push_str(RESET);
                } else {
                    line.push('.');
                }
                line.push(' ');
                continue;
            };
            let mut c = glyph(unit.kind);
            if unit.owner == Player::Opponent {
                c = c.to_ascii_lowercase();
            }
            let marker = if unit.pending_removal {
                'x'
            } else if unit.upgraded {
                '+'
            } else {
                ' '
            };
            if color {
                let palette = match unit.owner {
                    Player::Local => PLAYER_COLORS[0],
                    Player::Opponent => PLAYER_COLORS[1],
                };
                line.push_str(BOLD);
                line.push_str(palette);
                line.push(c);
                line.push_str(RESET);
            } else {
                line.push(c);
            }
            line.push(marker);
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
}

fn render_plan(output: &mut String, state: &GameState<'_>) {
    let plan = state.plan();
    output.push_str(&format!(
        "Plan: {} build, {} deploy\n",
        plan.build.len(),
        plan.deploy.len()
    ));
    for request in plan.build.iter().chain(&plan.deploy) {
        let line = match request {
            Request::Spawn { kind, at } => format!("  spawn   {kind} {at}\n"),
            Request::Upgrade { at } => format!("  upgrade {at}\n"),
            Request::Remove { at } => format!("  remove  {at}\n"),
        };
        output.push_str(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::StationaryUnit;
    use crate::config::GameConfig;

    #[test]
    fn test_render_plain() {
        let config = GameConfig::sample().unwrap();
        let mut state = GameState::empty(&config, 2, 10.0, 3.0);
        state.spawn(UnitKind::Turret, &[Coord::new(3, 12)], 1);
        state.place(StationaryUnit::new(
            UnitKind::Wall,
            Player::Opponent,
            Coord::new(3, 14),
            60.0,
        ));

        let text = render_ascii(&state, false);
        assert!(text.starts_with("Turn 2"));
        assert!(text.contains('T'));
        assert!(text.contains('w'));
        assert!(text.contains("Plan: 1 build, 0 deploy"));
        assert!(text.contains("spawn   turret [3, 12]"));
        assert!(!text.contains('\x1b'));
        // Header, 28 rows, blank line, legend, plan header, one request.
        assert_eq!(text.lines().count(), 1 + 28 + 1 + 1 + 1 + 1);
    }

    #[test]
    fn test_render_color() {
        let config = GameConfig::sample().unwrap();
        let state = GameState::empty(&config, 0, 0.0, 0.0);
        assert!(render_ascii(&state, true).contains(GRAY));
    }
}
