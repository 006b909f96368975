//! Message routing and disconnect handling.
//!
//! Every outgoing byte goes through here. A send that finds the peer gone
//! marks the participant disconnected and tells everyone else, exactly
//! once per participant, however many sends noticed it.

use std::collections::VecDeque;
use std::sync::Arc;

use lupus_protocol::{PlayerId, Scope, Status, text};
use lupus_transport::Connection;

use crate::Game;

impl<C: Connection> Game<C> {
    /// Switches the scope chatter is routed under.
    pub fn set_scope(&mut self, scope: Scope) {
        if self.scope != scope {
            tracing::debug!(from = %self.scope, to = %scope, "scope changed");
            self.scope = scope;
        }
    }

    /// Relays a chat line from `sender` under the current scope.
    ///
    /// The line reaches every other alive participant the scope admits,
    /// prefixed with the sender's name. Lines from the dead, and lines the
    /// scope doesn't admit from this sender, go nowhere.
    ///
    /// Returns how many participants received it.
    pub async fn route(&mut self, sender: PlayerId, message: &str) -> usize {
        let Some(from) = self.roster.get(sender).filter(|p| p.is_alive()) else {
            tracing::trace!(player = %sender, "dropped chatter from non-living participant");
            return 0;
        };

        let scope = self.scope;
        let sender_role = from.role();
        let line = text::chat(from.name(), message);
        let recipients: Vec<PlayerId> = self
            .roster
            .living()
            .filter(|p| p.id() != sender && scope.admits(sender_role, p.role()))
            .map(|p| p.id())
            .collect();

        let mut delivered = 0;
        for recipient in recipients {
            if self.notify(recipient, &line).await {
                delivered += 1;
            }
        }
        delivered
    }

    /// Sends `message` to one participant. Returns `true` if it went out.
    pub async fn notify(&mut self, id: PlayerId, message: &str) -> bool {
        let Some(connection) = self.live_connection(id) else {
            return false;
        };

        match connection.send(message).await {
            Ok(()) => true,
            Err(e) if e.is_connection_lost() => {
                tracing::info!(player = %id, error = %e, "send failed");
                self.disconnect(id).await;
                false
            }
            Err(e) => {
                tracing::warn!(player = %id, error = %e, "message not sent");
                false
            }
        }
    }

    /// Sends `message` to everyone still connected, dead included.
    pub async fn notify_all(&mut self, message: &str) {
        for id in self.roster.connected_ids() {
            self.notify(id, message).await;
        }
    }

    /// Sends `message` to every alive participant.
    pub async fn notify_living(&mut self, message: &str) {
        let living: Vec<PlayerId> = self.roster.living().map(|p| p.id()).collect();
        for id in living {
            self.notify(id, message).await;
        }
    }

    /// Marks `id` disconnected and tells the remaining participants.
    ///
    /// Already-disconnected participants are left alone, so each departure
    /// is announced once. Peers found broken while announcing are queued
    /// and handled the same way.
    pub async fn disconnect(&mut self, id: PlayerId) {
        let mut pending = VecDeque::from([id]);

        while let Some(lost) = pending.pop_front() {
            if self.roster.mark_status(lost, Status::Disconnected).is_err() {
                continue;
            }
            let Some(name) = self.roster.get(lost).map(|p| p.name()) else {
                continue;
            };
            tracing::info!(player = %lost, name, "participant disconnected");

            let notice = text::disconnected(name);
            let audience: Vec<(PlayerId, Arc<C>)> = self
                .roster
                .iter()
                .filter(|p| p.status().is_connected() && !pending.contains(&p.id()))
                .map(|p| (p.id(), Arc::clone(p.connection())))
                .collect();

            for (other, connection) in audience {
                match connection.send(&notice).await {
                    Ok(()) => {}
                    Err(e) if e.is_connection_lost() => {
                        tracing::debug!(player = %other, error = %e, "lost while announcing");
                        pending.push_back(other);
                    }
                    Err(e) => tracing::warn!(player = %other, error = %e, "notice not sent"),
                }
            }
        }
    }
}
