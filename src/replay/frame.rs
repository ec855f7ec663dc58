//! Action frame decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::arena::{Coord, Player, UnitKind};
use crate::error::{RampartError, Result};

/// Damage dealt to a unit during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Cell of the damaged unit.
    pub location: Coord,
    /// Damage taken.
    pub amount: f64,
    /// Type code of the damaged unit (0–2 structures, 3–5 mobile).
    pub code: u8,
    /// Owner of the damaged unit.
    pub owner: Player,
}

/// A mobile unit reaching its target edge during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreachEvent {
    /// Edge cell where the unit scored.
    pub location: Coord,
    /// Life points taken from the defender.
    pub amount: f64,
    /// Type code of the scoring unit.
    pub code: u8,
    /// Owner of the scoring unit.
    pub owner: Player,
}

/// One replay batch between two turn snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionFrame {
    /// Turn the frame belongs to.
    pub turn: u32,
    /// Frame index within the turn.
    pub frame: i64,
    /// Units that scored this frame.
    pub breaches: Vec<BreachEvent>,
    /// Damage dealt this frame.
    pub damage: Vec<DamageEvent>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    breach: Vec<Vec<Value>>,
    #[serde(default)]
    damage: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    turn_info: Vec<i64>,
    #[serde(default)]
    events: RawEvents,
}

/// The fields shared by breach and damage entries:
/// `[[x, y], amount, typeCode, unitId, playerIndex]`.
fn decode_entry(entry: &[Value], list: &str) -> Result<(Coord, f64, u8, Player)> {
    let bad = |what: &str| RampartError::malformed("frame", format!("{list} entry {what}"));

    let [location, amount, code, _id, player, ..] = entry else {
        return Err(bad("has fewer than 5 fields"));
    };
    let location: Coord =
        serde_json::from_value(location.clone()).map_err(|_| bad("has a bad location"))?;
    let amount = amount.as_f64().ok_or_else(|| bad("has a non-numeric amount"))?;
    let code = code
        .as_u64()
        .and_then(|c| u8::try_from(c).ok())
        .ok_or_else(|| bad("has a bad type code"))?;
    if UnitKind::from_code(code).is_none() {
        return Err(RampartError::UnknownUnit(format!("{list} type code {code}")));
    }
    let owner = player
        .as_u64()
        .and_then(|p| u8::try_from(p).ok())
        .and_then(Player::from_frame_index)
        .ok_or_else(|| bad("has a bad player index"))?;
    Ok((location, amount, code, owner))
}

impl ActionFrame {
    /// Decode an action frame line.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or an event entry is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decode an already-parsed action frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn number is missing or an event entry is malformed.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawFrame = serde_json::from_value(value)?;
        let turn = raw
            .turn_info
            .get(1)
            .and_then(|t| u32::try_from(*t).ok())
            .ok_or_else(|| RampartError::malformed("frame", "turnInfo lacks a turn number"))?;

        let breaches = raw
            .events
            .breach
            .iter()
            .map(|entry| {
                decode_entry(entry, "breach").map(|(location, amount, code, owner)| BreachEvent {
                    location,
                    amount,
                    code,
                    owner,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let damage = raw
            .events
            .damage
            .iter()
            .map(|entry| {
                decode_entry(entry, "damage").map(|(location, amount, code, owner)| DamageEvent {
                    location,
                    amount,
                    code,
                    owner,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            turn,
            frame: raw.turn_info.get(2).copied().unwrap_or(0),
            breaches,
            damage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame() {
        let json = r#"{
            "turnInfo": [1, 3, 17],
            "events": {
                "breach": [[[24, 10], 1, 3, "41", 2]],
                "damage": [[[3, 12], 6.0, 2, "7", 1], [[20, 16], 2, 3, "88", 2]],
                "move": [], "spawn": [], "death": [], "attack": [], "selfDestruct": [],
                "melee": [], "shield": []
            }
        }"#;
        let frame = ActionFrame::from_json(json).unwrap();
        assert_eq!(frame.turn, 3);
        assert_eq!(frame.frame, 17);
        assert_eq!(frame.breaches.len(), 1);
        assert_eq!(frame.breaches[0].owner, Player::Opponent);
        assert_eq!(frame.breaches[0].location, Coord::new(24, 10));
        assert_eq!(frame.damage.len(), 2);
        assert_eq!(frame.damage[0].code, 2);
        assert_eq!(frame.damage[0].owner, Player::Local);
        assert!((frame.damage[1].amount - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_events_is_empty_frame() {
        let frame = ActionFrame::from_json(r#"{"turnInfo": [1, 0, 0]}"#).unwrap();
        assert!(frame.breaches.is_empty());
        assert!(frame.damage.is_empty());
    }

    #[test]
    fn test_short_entry_is_rejected() {
        let json = r#"{"turnInfo": [1, 3, 2], "events": {"damage": [[[3, 12], 6.0, 2]]}}"#;
        assert!(matches!(
            ActionFrame::from_json(json),
            Err(RampartError::MalformedMessage { kind: "frame", .. })
        ));
    }

    #[test]
    fn test_unknown_type_code_is_rejected() {
        let json = r#"{"turnInfo": [1, 3, 2], "events": {"damage": [[[3, 12], 6.0, 9, "4", 1]]}}"#;
        assert!(matches!(
            ActionFrame::from_json(json),
            Err(RampartError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_bad_player_index_is_rejected() {
        let json = r#"{"turnInfo": [1, 3, 2], "events": {"breach": [[[3, 12], 1, 3, "1", 7]]}}"#;
        assert!(ActionFrame::from_json(json).is_err());
    }
}
