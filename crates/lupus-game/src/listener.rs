//! Discussion windows.
//!
//! While a window is open, one task per member reads that member's
//! connection and forwards whatever arrives to the engine:
//!
//! ```text
//!  conn P1 ──► listener ─┐
//!  conn P2 ──► listener ─┼──► mpsc ──► Game::route
//!  conn P5 ──► listener ─┘
//! ```
//!
//! The tasks own nothing but an `Arc` of their connection and the channel
//! sender. Closing the window signals them over a `watch` channel and waits
//! for every one to finish, so no listener is still reading when the next
//! phase starts.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use lupus_protocol::{PlayerId, Scope};
use lupus_transport::Connection;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{Game, GameError};

/// What a listener saw on its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chatter {
    /// A complete line from a member.
    Line { from: PlayerId, text: String },
    /// The member's connection closed or broke. The listener has stopped.
    Lost { from: PlayerId, reason: String },
}

/// A running set of listener tasks.
///
/// Dropping a `Window` without [`close`](Self::close) still stops the
/// listeners (their stop channel closes) but does not wait for them.
pub struct Window {
    stop: watch::Sender<bool>,
    listeners: Vec<(PlayerId, JoinHandle<()>)>,
}

impl Window {
    /// Spawns one listener per member, all reporting to `chatter`.
    pub fn open<C: Connection>(
        members: Vec<(PlayerId, Arc<C>)>,
        chatter: mpsc::UnboundedSender<Chatter>,
    ) -> Self {
        let (stop, _) = watch::channel(false);
        let listeners = members
            .into_iter()
            .map(|(id, connection)| {
                let handle = tokio::spawn(listen(id, connection, stop.subscribe(), chatter.clone()));
                (id, handle)
            })
            .collect();
        Self { stop, listeners }
    }

    /// Number of members being listened to.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Stops every listener and waits until all have finished.
    ///
    /// # Errors
    /// [`GameError::Listener`] if a task panicked or was aborted.
    pub async fn close(self) -> Result<(), GameError> {
        let Self { stop, listeners } = self;
        stop.send_replace(true);

        let (ids, handles): (Vec<_>, Vec<_>) = listeners.into_iter().unzip();
        for (player, joined) in ids.into_iter().zip(join_all(handles).await) {
            joined.map_err(|e| GameError::Listener {
                player,
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Reads `connection` until told to stop or the connection goes away.
async fn listen<C: Connection>(
    id: PlayerId,
    connection: Arc<C>,
    mut stop: watch::Receiver<bool>,
    chatter: mpsc::UnboundedSender<Chatter>,
) {
    loop {
        tokio::select! {
            // Stop wins over a ready line: after close, nothing more is read.
            biased;
            _ = stop.changed() => break,
            received = connection.recv() => {
                let report = match received {
                    Ok(Some(text)) => Chatter::Line { from: id, text },
                    Ok(None) => Chatter::Lost { from: id, reason: "connection closed".into() },
                    Err(e) => Chatter::Lost { from: id, reason: e.to_string() },
                };
                let lost = matches!(report, Chatter::Lost { .. });
                if chatter.send(report).is_err() || lost {
                    break;
                }
            }
        }
    }
    tracing::trace!(player = %id, "listener stopped");
}

// ---------------------------------------------------------------------------
// Engine side
// ---------------------------------------------------------------------------

impl<C: Connection> Game<C> {
    /// Opens a window over `members` for `length`, routing every line they
    /// send under the current scope.
    ///
    /// Members already disconnected are skipped. Losses reported by a
    /// listener, even ones queued after the deadline, are applied before
    /// this returns; late lines are discarded.
    pub async fn discuss(&mut self, members: &[PlayerId], length: Duration) -> Result<(), GameError> {
        let connections: Vec<(PlayerId, Arc<C>)> = members
            .iter()
            .filter_map(|&id| self.live_connection(id).map(|connection| (id, connection)))
            .collect();
        if connections.is_empty() {
            return Ok(());
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let window = Window::open(connections, tx);
        tracing::debug!(scope = %self.scope, members = window.len(), ?length, "window opened");

        let deadline = tokio::time::Instant::now() + length;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                Some(chatter) = rx.recv() => self.apply(chatter).await,
            }
        }

        window.close().await?;
        while let Ok(chatter) = rx.try_recv() {
            if let Chatter::Lost { .. } = chatter {
                self.apply(chatter).await;
            }
        }
        tracing::debug!("window closed");
        Ok(())
    }

    /// Reads and discards whatever participants typed outside of a prompt.
    ///
    /// Runs a short silenced window over everyone connected, so a line
    /// typed early can't be taken as the answer to the next question.
    pub async fn drain_stale(&mut self) -> Result<(), GameError> {
        let length = self.config.stale_drain();
        if length.is_zero() {
            return Ok(());
        }

        let previous = self.scope;
        self.set_scope(Scope::Silenced);
        let everyone = self.roster.connected_ids();
        self.discuss(&everyone, length).await?;
        self.set_scope(previous);
        Ok(())
    }

    async fn apply(&mut self, chatter: Chatter) {
        match chatter {
            Chatter::Line { from, text } => {
                self.route(from, &text).await;
            }
            Chatter::Lost { from, reason } => {
                tracing::info!(player = %from, %reason, "lost during discussion");
                self.disconnect(from).await;
            }
        }
    }
}
