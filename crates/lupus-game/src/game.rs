//! The engine itself: shared state plus the prompting helpers every phase
//! uses.

use std::sync::Arc;

use lupus_protocol::{PlayerId, Scope, Status, text};
use lupus_session::{Participant, Roster};
use lupus_transport::Connection;

use crate::{GameConfig, GameError, Outcome, WitchPotions};

/// One game of Werewolf over a full roster.
///
/// The engine is the only writer of participant status, the scope and the
/// potions. Listener tasks spawned during discussion windows never touch
/// this state; they report back over a channel and the engine applies
/// what they saw.
pub struct Game<C: Connection> {
    pub(crate) roster: Roster<C>,
    pub(crate) scope: Scope,
    pub(crate) potions: WitchPotions,
    pub(crate) config: GameConfig,
    round: u32,
}

impl<C: Connection> Game<C> {
    /// Prepares a game over an already dealt roster.
    pub fn new(roster: Roster<C>, config: GameConfig) -> Self {
        Self {
            roster,
            scope: Scope::Silenced,
            potions: WitchPotions::new(),
            config,
            round: 0,
        }
    }

    pub fn roster(&self) -> &Roster<C> {
        &self.roster
    }

    /// The scope chatter is currently routed under.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn potions(&self) -> WitchPotions {
        self.potions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Nights started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Plays night and day in turn until a win condition holds.
    ///
    /// The check runs before every night and before every day; the final
    /// announcement goes to everyone still connected.
    ///
    /// # Errors
    /// Only the failures in [`GameError`]. Lost players are handled in
    /// play and never end the game early on their own.
    pub async fn run(&mut self) -> Result<Outcome, GameError> {
        tracing::info!(players = self.roster.len(), "game started");
        loop {
            let outcome = self.conclude().await;
            if outcome.is_over() {
                return Ok(outcome);
            }

            self.round += 1;
            let night = self.play_night().await?;
            tracing::info!(round = self.round, deaths = night.deaths().len(), "night resolved");

            let outcome = self.conclude().await;
            if outcome.is_over() {
                return Ok(outcome);
            }

            let day = self.play_day().await?;
            tracing::info!(round = self.round, verdict = ?day.verdict, "day resolved");
        }
    }

    /// Closes every connection. Errors are logged; the peers are going away
    /// either way.
    pub async fn shutdown(&self) {
        for participant in self.roster.iter() {
            if let Err(e) = participant.connection().close().await {
                tracing::debug!(player = %participant.id(), error = %e, "close failed");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Prompting
    // -----------------------------------------------------------------------

    /// Reads one line straight from `id`, trimmed.
    ///
    /// Returns `None` when `id` is no longer connected or the read fails,
    /// in which case the participant is marked disconnected.
    pub(crate) async fn answer(&mut self, id: PlayerId) -> Option<String> {
        let connection = self.live_connection(id)?;
        match connection.recv().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => {
                tracing::info!(player = %id, "closed while being prompted");
                self.disconnect(id).await;
                None
            }
            Err(e) => {
                tracing::warn!(player = %id, error = %e, "read failed while being prompted");
                self.disconnect(id).await;
                None
            }
        }
    }

    /// Sends `prompt` and reads the reply.
    pub(crate) async fn ask(&mut self, id: PlayerId, prompt: &str) -> Option<String> {
        self.notify(id, prompt).await;
        self.answer(id).await
    }

    /// Asks a y/n question. Anything but `y` or `yes` is a no.
    pub(crate) async fn ask_yes_no(&mut self, id: PlayerId, prompt: &str) -> bool {
        self.ask(id, prompt)
            .await
            .is_some_and(|reply| is_yes(&reply))
    }

    /// Reads names from `id` until one names an alive participant that
    /// `eligible` allows, answering every miss with `reprompt`.
    ///
    /// Returns `None` only if `id` drops out while choosing.
    pub(crate) async fn choose_target(
        &mut self,
        id: PlayerId,
        reprompt: Reprompt,
        eligible: Eligible,
    ) -> Option<PlayerId> {
        loop {
            let reply = self.answer(id).await?;
            let named = self.roster.find(&reply).and_then(|target| self.roster.get(target));
            let retry = match named {
                Some(target) if target.is_alive() && eligible.admits(target) => {
                    return Some(target.id());
                }
                Some(target) if !target.is_alive() => reprompt.gone,
                _ => reprompt.invalid,
            };
            tracing::debug!(player = %id, reply = %reply, "rejected target");
            self.notify(id, retry).await;
        }
    }

    /// Newline-separated names of the participants `keep` selects.
    pub(crate) fn names_where(&self, keep: impl Fn(&Participant<C>) -> bool) -> String {
        text::name_list(self.roster.iter().filter(|p| keep(p)).map(|p| p.name()))
    }

    pub(crate) fn live_connection(&self, id: PlayerId) -> Option<Arc<C>> {
        self.roster
            .get(id)
            .filter(|p| p.status() != Status::Disconnected)
            .map(|p| Arc::clone(p.connection()))
    }

    pub(crate) fn is_alive(&self, id: PlayerId) -> bool {
        self.roster.get(id).is_some_and(|p| p.is_alive())
    }
}

/// Who a night action or vote may name, beyond being alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Eligible {
    Anyone,
    AnyoneBut(PlayerId),
    NonWerewolf,
}

impl Eligible {
    pub(crate) fn admits<C>(self, target: &Participant<C>) -> bool {
        match self {
            Eligible::Anyone => true,
            Eligible::AnyoneBut(chooser) => target.id() != chooser,
            Eligible::NonWerewolf => !target.role().is_werewolf(),
        }
    }
}

/// What a chooser hears after a name that can't be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reprompt {
    /// Unknown names and names `Eligible` rules out.
    pub(crate) invalid: &'static str,
    /// Names of participants who are no longer alive.
    pub(crate) gone: &'static str,
}

impl Reprompt {
    pub(crate) const fn always(text: &'static str) -> Self {
        Self {
            invalid: text,
            gone: text,
        }
    }
}

/// `y` or `yes`, any case.
pub(crate) fn is_yes(reply: &str) -> bool {
    let reply = reply.trim();
    reply.eq_ignore_ascii_case("y") || reply.eq_ignore_ascii_case("yes")
}
