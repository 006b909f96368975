//! The roster: every participant of the one game this process referees.
//!
//! The roster is an arena. A participant's [`PlayerId`] is its seat index
//! and seats are never removed, so ids stay valid for the whole game.
//!
//! # Concurrency note
//!
//! `Roster` is NOT thread-safe by itself. It is owned by the game engine's
//! control task, which is the only writer. Listener tasks never see the
//! roster; they hold `Arc` handles to connections and report what they
//! read back to the engine.

use std::sync::Arc;

use lupus_protocol::{PlayerId, Role, Status};

use crate::{Deck, SessionError};

/// Number of seats in a game.
pub const ROSTER_SIZE: usize = 7;

/// Display names, handed out in arrival order.
pub const NAME_POOL: [&str; ROSTER_SIZE] = [
    "Player 1", "Player 2", "Player 3", "Player 4", "Player 5", "Player 6", "Player 7",
];

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One seated player.
///
/// Generic over the connection type `C` so the session layer doesn't
/// depend on any particular transport.
#[derive(Debug)]
pub struct Participant<C> {
    id: PlayerId,
    name: &'static str,
    role: Role,
    status: Status,
    votes: u32,
    connection: Arc<C>,
}

impl<C> Participant<C> {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The display name, e.g. "Player 3".
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    /// Votes received in the current day phase.
    pub fn votes(&self) -> u32 {
        self.votes
    }

    /// A shared handle to the participant's connection.
    pub fn connection(&self) -> &Arc<C> {
        &self.connection
    }
}

// ---------------------------------------------------------------------------
// Census
// ---------------------------------------------------------------------------

/// Head count of the living, as the win condition sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    /// Alive participants, werewolves included.
    pub alive: usize,
    /// Alive werewolves.
    pub werewolves: usize,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The fixed set of participants.
#[derive(Debug)]
pub struct Roster<C> {
    participants: Vec<Participant<C>>,
}

impl<C> Default for Roster<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Roster<C> {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self {
            participants: Vec::with_capacity(ROSTER_SIZE),
        }
    }

    /// Seats all connections at once with roles dealt from `deck`.
    ///
    /// Names follow the order of `connections`.
    ///
    /// # Errors
    /// [`SessionError::WrongRosterSize`] unless exactly [`ROSTER_SIZE`]
    /// connections are given.
    pub fn assign(connections: Vec<Arc<C>>, mut deck: Deck) -> Result<Self, SessionError> {
        if connections.len() != ROSTER_SIZE {
            return Err(SessionError::WrongRosterSize {
                expected: ROSTER_SIZE,
                got: connections.len(),
            });
        }

        let mut roster = Self::new();
        for connection in connections {
            let role = deck.deal().ok_or(SessionError::RosterFull(ROSTER_SIZE))?;
            roster.seat(connection, role)?;
        }
        Ok(roster)
    }

    /// Seats one connection in the next free seat with the given role.
    ///
    /// # Errors
    /// - [`SessionError::RosterFull`]: all seats are taken
    /// - [`SessionError::RoleUnavailable`]: the deck has no copy of
    ///   `role` left once the already-seated participants are counted
    pub fn seat(&mut self, connection: Arc<C>, role: Role) -> Result<PlayerId, SessionError> {
        let seat = self.participants.len();
        let name = *NAME_POOL
            .get(seat)
            .ok_or(SessionError::RosterFull(ROSTER_SIZE))?;

        let in_deck = Role::DECK.iter().filter(|r| **r == role).count();
        let seated = self.participants.iter().filter(|p| p.role == role).count();
        if seated >= in_deck {
            return Err(SessionError::RoleUnavailable(role));
        }

        let id = PlayerId(seat);
        self.participants.push(Participant {
            id,
            name,
            role,
            status: Status::Alive,
            votes: 0,
            connection,
        });
        tracing::info!(player = %id, name, "participant seated");
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Returns `true` once every seat is taken.
    pub fn is_full(&self) -> bool {
        self.participants.len() == ROSTER_SIZE
    }

    pub fn get(&self, id: PlayerId) -> Option<&Participant<C>> {
        self.participants.get(id.0)
    }

    /// All participants in seat order, whatever their status.
    pub fn iter(&self) -> impl Iterator<Item = &Participant<C>> {
        self.participants.iter()
    }

    /// Ids of every participant in seat order.
    pub fn ids(&self) -> Vec<PlayerId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    /// Alive participants in seat order.
    pub fn living(&self) -> impl Iterator<Item = &Participant<C>> {
        self.participants.iter().filter(|p| p.is_alive())
    }

    /// Alive holders of `role` in seat order.
    pub fn living_with_role(&self, role: Role) -> impl Iterator<Item = &Participant<C>> {
        self.living().filter(move |p| p.role == role)
    }

    /// The first alive holder of `role`, if any.
    pub fn first_living_with_role(&self, role: Role) -> Option<PlayerId> {
        self.living_with_role(role).next().map(|p| p.id)
    }

    /// Ids of participants that can still receive messages.
    pub fn connected_ids(&self) -> Vec<PlayerId> {
        self.participants
            .iter()
            .filter(|p| p.status.is_connected())
            .map(|p| p.id)
            .collect()
    }

    /// Finds the participant called `name`, alive or not.
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        self.participants.iter().find(|p| p.name == name).map(|p| p.id)
    }

    /// Finds the alive participant called `name`.
    ///
    /// Surrounding whitespace in `name` is ignored, so a trailing `\r\n`
    /// from a line-based client still matches.
    pub fn find_living(&self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        self.living().find(|p| p.name == name).map(|p| p.id)
    }

    /// Returns `true` iff `name` is an alive participant.
    pub fn is_valid_living_target(&self, name: &str) -> bool {
        self.find_living(name).is_some()
    }

    /// Moves a participant forward to `status`.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`]: unknown id
    /// - [`SessionError::InvalidTransition`]: the move isn't one of
    ///   alive→dead, alive→disconnected, dead→disconnected
    pub fn mark_status(&mut self, id: PlayerId, status: Status) -> Result<(), SessionError> {
        let participant = self
            .participants
            .get_mut(id.0)
            .ok_or(SessionError::NotFound(id))?;

        if !participant.status.can_transition_to(status) {
            return Err(SessionError::InvalidTransition {
                player: id,
                from: participant.status,
                to: status,
            });
        }

        tracing::info!(
            player = %id,
            name = participant.name,
            from = %participant.status,
            to = %status,
            "status changed"
        );
        participant.status = status;
        Ok(())
    }

    /// Records `voter`'s vote against the alive participant `target_name`.
    ///
    /// Returns the target's id.
    ///
    /// # Errors
    /// - [`SessionError::VoterNotAlive`]: dead and disconnected don't vote
    /// - [`SessionError::NoSuchTarget`]: no alive participant by that name
    pub fn tally_vote(&mut self, voter: PlayerId, target_name: &str) -> Result<PlayerId, SessionError> {
        let voter_alive = self
            .get(voter)
            .ok_or(SessionError::NotFound(voter))?
            .is_alive();
        if !voter_alive {
            return Err(SessionError::VoterNotAlive(voter));
        }

        let target = self
            .find_living(target_name)
            .ok_or_else(|| SessionError::NoSuchTarget(target_name.trim().to_string()))?;
        self.participants[target.0].votes += 1;
        tracing::debug!(%voter, %target, "vote recorded");
        Ok(target)
    }

    /// Per-participant vote counts in seat order.
    pub fn tally(&self) -> Vec<(PlayerId, u32)> {
        self.participants.iter().map(|p| (p.id, p.votes)).collect()
    }

    /// Clears every vote counter.
    pub fn reset_votes(&mut self) {
        for participant in &mut self.participants {
            participant.votes = 0;
        }
    }

    /// Counts the living and the living werewolves.
    pub fn census(&self) -> Census {
        self.living().fold(Census::default(), |mut census, p| {
            census.alive += 1;
            if p.role.is_werewolf() {
                census.werewolves += 1;
            }
            census
        })
    }
}
