//! Error types for the session layer.

use lupus_protocol::{PlayerId, Role, Status};

/// Errors that can occur while seating participants or updating them.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Every seat is already taken.
    #[error("roster is full ({0} participants)")]
    RosterFull(usize),

    /// Seating would put more copies of a role on the table than the deck
    /// holds.
    #[error("no {0} card left in the deck")]
    RoleUnavailable(Role),

    /// A one-shot assignment got the wrong number of connections.
    #[error("expected {expected} connections, got {got}")]
    WrongRosterSize { expected: usize, got: usize },

    /// No participant has this id.
    #[error("participant {0} not found")]
    NotFound(PlayerId),

    /// The requested status change would move a participant backwards.
    #[error("participant {player} cannot go from {from} to {to}")]
    InvalidTransition {
        player: PlayerId,
        from: Status,
        to: Status,
    },

    /// The named target isn't an alive participant.
    #[error("no living participant named {0:?}")]
    NoSuchTarget(String),

    /// Only alive participants may vote.
    #[error("participant {0} is not alive and cannot vote")]
    VoterNotAlive(PlayerId),
}
