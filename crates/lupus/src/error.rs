//! Unified error type for the Lupus server.

use lupus_game::GameError;
use lupus_session::SessionError;
use lupus_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` lift any sub-crate error into this one.
#[derive(Debug, thiserror::Error)]
pub enum LupusError {
    /// Binding or accepting failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Seating or dealing went wrong.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The game could not be played through.
    #[error(transparent)]
    Game(#[from] GameError),
}
