//! Wire protocol for Lupus.
//!
//! This crate defines the "language" that the referee and the players speak:
//!
//! - **Codec** ([`FrameCodec`]): how one text message is delimited on a
//!   byte stream (length header + payload).
//! - **Types** ([`PlayerId`], [`Role`], [`Status`], [`Scope`]): the shared
//!   vocabulary of the game.
//! - **Text** ([`text`]): every line a player can be sent, in one place.
//! - **Errors** ([`ProtocolError`]): what can go wrong while framing.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about sockets or game phases. It only
//! knows how messages are cut out of a byte stream and what they say.
//!
//! ```text
//! Transport (bytes) → Protocol (frames, vocabulary) → Session → Game
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
pub mod text;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::{FrameCodec, HEADER_LENGTH, MAX_MESSAGE_LENGTH};
pub use error::ProtocolError;
pub use types::{PlayerId, Role, Scope, Status};
