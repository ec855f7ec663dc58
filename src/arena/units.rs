//! Unit kinds, owners, and resources.

use serde::{Deserialize, Serialize};

use crate::arena::Coord;

/// Every unit kind the host knows, in host config order.
///
/// The discriminant is the replay type code: action frames report damaged and
/// breaching units by this index, and `unitInformation[i]` in the game config
/// describes kind `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnitKind {
    /// Cheap blocking structure (host name: filter).
    Wall = 0,
    /// Support structure that buffs passing mobile units (host name: encryptor).
    Shield = 1,
    /// Structure that fires on enemy units in range (host name: destructor).
    Turret = 2,
    /// Fast, fragile mobile unit (host name: ping).
    Scout = 3,
    /// Slow, long-range mobile unit that targets structures (host name: EMP).
    Demolisher = 4,
    /// Mobile unit that hunts enemy mobile units (host name: scrambler).
    Interceptor = 5,
}

impl UnitKind {
    /// All kinds, ordered by type code.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Shield,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
    ];

    /// Replay type code for this kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by replay type code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Whether the kind is a fixed structure.
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, UnitKind::Wall | UnitKind::Shield | UnitKind::Turret)
    }

    /// Whether the kind walks a path.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        !self.is_stationary()
    }

    /// The currency that pays for this kind.
    #[must_use]
    pub const fn resource(self) -> Resource {
        if self.is_stationary() {
            Resource::Cores
        } else {
            Resource::Bits
        }
    }

    /// Index in `unitInformation` and in the per-player unit lists.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UnitKind::Wall => "wall",
            UnitKind::Shield => "shield",
            UnitKind::Turret => "turret",
            UnitKind::Scout => "scout",
            UnitKind::Demolisher => "demolisher",
            UnitKind::Interceptor => "interceptor",
        };
        f.write_str(name)
    }
}

/// Type code of a removal; also the index of the removal list in a snapshot.
pub const REMOVE_CODE: u8 = 6;

/// Type code of an upgrade; also the index of the upgrade list in a snapshot.
pub const UPGRADE_CODE: u8 = 7;

/// One of the two players.
///
/// The host numbers players 1 and 2 in raw frame data; the engine always sees
/// itself as [`Player::Local`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player this engine is deciding for.
    Local,
    /// The other player.
    Opponent,
}

impl Player {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Local => Player::Opponent,
            Player::Opponent => Player::Local,
        }
    }

    /// Decode the raw player index used in action frames (1 = self, 2 = opponent).
    #[must_use]
    pub const fn from_frame_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Player::Local),
            2 => Some(Player::Opponent),
            _ => None,
        }
    }
}

/// The two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Pays for structures and upgrades.
    Cores,
    /// Pays for mobile units.
    Bits,
}

/// A structure standing on a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryUnit {
    /// What kind of structure it is.
    pub kind: UnitKind,
    /// Who built it.
    pub owner: Player,
    /// Where it stands.
    pub location: Coord,
    /// Remaining health.
    pub health: f64,
    /// Whether its one-time upgrade has been applied.
    pub upgraded: bool,
    /// Whether its owner flagged it for removal.
    pub pending_removal: bool,
}

impl StationaryUnit {
    /// Create a fresh, non-upgraded structure.
    #[must_use]
    pub const fn new(kind: UnitKind, owner: Player, location: Coord, health: f64) -> Self {
        Self {
            kind,
            owner,
            location,
            health,
            upgraded: false,
            pending_removal: false,
        }
    }
}
