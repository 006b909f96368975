//! The session registry for Lupus.
//!
//! This crate knows who is playing:
//!
//! 1. **Dealing**: shuffling the fixed role deck ([`Deck`])
//! 2. **Seating**: giving each connection a name and a role ([`Roster`])
//! 3. **Status**: moving participants forward from alive to dead or
//!    disconnected, never back
//! 4. **Votes**: the per-day tally
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Layer (above)  ← owns the roster, drives phases
//!     ↕
//! Session Layer (this crate)  ← participant identity, role and status
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId, Role, Status
//! ```

mod deck;
mod error;
mod roster;

pub use deck::Deck;
pub use error::SessionError;
pub use roster::{Census, Participant, Roster, NAME_POOL, ROSTER_SIZE};
