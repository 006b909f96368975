//! Core vocabulary shared by every layer of Lupus.
//!
//! These types say WHO a participant is ([`PlayerId`]), WHAT they secretly
//! are ([`Role`]), WHETHER they still play ([`Status`]), and WHO may
//! currently hear whom ([`Scope`]).

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A stable identifier for a seated participant.
///
/// Newtype over the seat index in the roster. Seats are never removed, so
/// the index stays valid for the whole game (a disconnect downgrades the
/// participant's status instead of freeing the seat).
///
/// `#[serde(transparent)]` serializes `PlayerId(3)` as plain `3`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A participant's secret role.
///
/// Rendered in lower case everywhere players can see it ("werewolf",
/// "seer", ...), and serialized the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Kills one player per night together with the other werewolf.
    Werewolf,
    /// Protects one other player per night from the werewolves.
    Guard,
    /// Holds one save potion and one kill potion for the whole game.
    Witch,
    /// Marks a victim each night who dies with them if they die that night.
    Hunter,
    /// Learns one other player's role per night.
    Seer,
    /// No night action.
    Villager,
}

impl Role {
    /// The full deck dealt onto the roster, one card per seat.
    pub const DECK: [Role; 7] = [
        Role::Werewolf,
        Role::Werewolf,
        Role::Guard,
        Role::Witch,
        Role::Hunter,
        Role::Seer,
        Role::Villager,
    ];

    /// Returns `true` for the werewolf team.
    pub fn is_werewolf(self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// The lower-case name shown to players.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Werewolf => "werewolf",
            Role::Guard => "guard",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
            Role::Seer => "seer",
            Role::Villager => "villager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Whether a participant still takes part in the game.
///
/// Transitions only move forward:
///
/// ```text
/// Alive ──→ Dead ──→ Disconnected
///   │                     ↑
///   └─────────────────────┘
/// ```
///
/// `Disconnected` is absorbing. For every game-logic purpose (targeting,
/// voting, win conditions) only `Alive` counts as alive; `Dead` and
/// `Disconnected` differ only in what other players are told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Alive,
    Dead,
    Disconnected,
}

impl Status {
    /// Returns `true` only for [`Status::Alive`].
    pub fn is_alive(self) -> bool {
        matches!(self, Status::Alive)
    }

    /// Returns `true` if a message can still be delivered.
    pub fn is_connected(self) -> bool {
        !matches!(self, Status::Disconnected)
    }

    /// Returns `true` if moving from `self` to `target` is allowed.
    pub fn can_transition_to(self, target: Status) -> bool {
        matches!(
            (self, target),
            (Status::Alive, Status::Dead)
                | (Status::Alive, Status::Disconnected)
                | (Status::Dead, Status::Disconnected)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Alive => write!(f, "alive"),
            Status::Dead => write!(f, "dead"),
            Status::Disconnected => write!(f, "disconnected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Who may currently hear whom.
///
/// Exactly one scope is active at a time. It only gates player-to-player
/// chatter; system messages from the referee ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scope {
    /// Every alive participant hears every other alive participant.
    Public,
    /// Only alive holders of this role hear each other.
    Role(Role),
    /// Nobody's chatter is relayed.
    #[default]
    Silenced,
}

impl Scope {
    /// Returns `true` if chatter from a `sender` holding one role may reach
    /// a `listener` holding another. Status is the caller's concern.
    pub fn admits(self, sender: Role, listener: Role) -> bool {
        match self {
            Scope::Public => true,
            Scope::Role(role) => sender == role && listener == role,
            Scope::Silenced => false,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Public => write!(f, "public"),
            Scope::Role(role) => write!(f, "role:{role}"),
            Scope::Silenced => write!(f, "silenced"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
