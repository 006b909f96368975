//! Error types for the game layer.
//!
//! Player mistakes (unknown names, self-targets) and lost connections are
//! NOT errors here: the engine re-prompts or marks the participant
//! disconnected and carries on. What's left are the failures the engine
//! can't play through.

use lupus_protocol::PlayerId;
use lupus_session::SessionError;

/// Errors that stop the game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A listener task could not be confirmed stopped. Scope isolation
    /// can no longer be guaranteed, so the game ends.
    #[error("listener for {player} failed: {reason}")]
    Listener { player: PlayerId, reason: String },

    /// The roster refused an update the engine believed valid.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`GameConfig`](crate::GameConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
