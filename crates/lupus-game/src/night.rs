//! The night phase.
//!
//! Each role acts in a fixed order on a silenced table, with stale input
//! drained before every prompt:
//!
//! 1. **Seer** inspects one living participant's role.
//! 2. **Werewolves** discuss privately; the first living werewolf picks
//!    the victim.
//! 3. **Guard** protects one other participant. Protecting the victim
//!    cancels the werewolf kill.
//! 4. **Witch** may spend the save potion on the victim, then the kill
//!    potion on anyone alive. Each potion works once per game.
//! 5. **Hunter** marks someone. The mark only matters if the hunter is
//!    dying tonight.
//!
//! Nobody dies until all of that is resolved; then the deaths are applied
//! and announced together.

use lupus_protocol::{PlayerId, Role, Scope, Status, text};
use lupus_transport::Connection;

use crate::game::{Eligible, Reprompt};
use crate::{Game, GameError};

/// Witch and hunter misses: an unknown name, or someone already dead.
const NAME_MISS: Reprompt = Reprompt {
    invalid: text::INVALID_USERNAME,
    gone: text::USER_GONE,
};

/// The witch's two single-use potions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitchPotions {
    save: bool,
    kill: bool,
}

impl Default for WitchPotions {
    fn default() -> Self {
        Self::new()
    }
}

impl WitchPotions {
    /// Both potions available.
    pub fn new() -> Self {
        Self { save: true, kill: true }
    }

    pub fn has_save(&self) -> bool {
        self.save
    }

    pub fn has_kill(&self) -> bool {
        self.kill
    }

    /// Uses the save potion. Returns `false` if it was already gone.
    pub fn use_save(&mut self) -> bool {
        std::mem::replace(&mut self.save, false)
    }

    /// Uses the kill potion. Returns `false` if it was already gone.
    pub fn use_kill(&mut self) -> bool {
        std::mem::replace(&mut self.kill, false)
    }
}

/// What one night resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightReport {
    /// Whom the seer inspected.
    pub inspected: Option<PlayerId>,
    /// The werewolves' victim after the guard and the save potion.
    pub werewolf_victim: Option<PlayerId>,
    /// The kill potion's target.
    pub witch_victim: Option<PlayerId>,
    /// The hunter's mark, if the hunter died and took it along.
    pub hunter_victim: Option<PlayerId>,
}

impl NightReport {
    /// Everyone who dies tonight, each once: the witch's target, then the
    /// werewolves', then the hunter's.
    pub fn deaths(&self) -> Vec<PlayerId> {
        let mut deaths = Vec::with_capacity(3);
        for id in [self.witch_victim, self.werewolf_victim, self.hunter_victim]
            .into_iter()
            .flatten()
        {
            if !deaths.contains(&id) {
                deaths.push(id);
            }
        }
        deaths
    }

    pub fn is_peaceful(&self) -> bool {
        self.deaths().is_empty()
    }
}

impl<C: Connection> Game<C> {
    /// Plays one night and applies its deaths.
    pub async fn play_night(&mut self) -> Result<NightReport, GameError> {
        tracing::info!(round = self.round(), "night falls");
        self.set_scope(Scope::Silenced);

        let mut report = NightReport::default();

        self.drain_stale().await?;
        report.inspected = self.seer_turn().await;

        self.drain_stale().await?;
        let victim = self.werewolf_turn().await?;

        self.drain_stale().await?;
        let victim = self.guard_turn(victim).await;

        self.drain_stale().await?;
        report.werewolf_victim = self.witch_save_turn(victim).await;

        self.drain_stale().await?;
        report.witch_victim = self.witch_kill_turn().await;

        self.drain_stale().await?;
        report.hunter_victim = self
            .hunter_turn(report.werewolf_victim, report.witch_victim)
            .await;

        self.announce_night(&report).await?;
        Ok(report)
    }

    async fn seer_turn(&mut self) -> Option<PlayerId> {
        let seer = self.roster.first_living_with_role(Role::Seer)?;

        let others = self.names_where(|p| p.is_alive() && p.id() != seer);
        self.notify(seer, &format!("{}{others}", text::SEER_PROMPT)).await;

        let target = self
            .choose_target(seer, Reprompt::always(text::SEER_RETRY), Eligible::AnyoneBut(seer))
            .await?;
        let (name, role) = self.roster.get(target).map(|p| (p.name(), p.role()))?;
        self.notify(seer, &text::seer_reveal(name, role)).await;
        tracing::debug!(%seer, %target, %role, "seer inspected");
        Some(target)
    }

    async fn werewolf_turn(&mut self) -> Result<Option<PlayerId>, GameError> {
        let pack: Vec<PlayerId> = self
            .roster
            .living_with_role(Role::Werewolf)
            .map(|p| p.id())
            .collect();
        if pack.is_empty() {
            return Ok(None);
        }

        let prey = self.names_where(|p| p.is_alive() && !p.role().is_werewolf());
        let briefing = format!(
            "{}{prey}",
            text::werewolf_briefing(self.config.night_discussion().as_secs())
        );
        for &wolf in &pack {
            self.notify(wolf, &briefing).await;
        }

        self.set_scope(Scope::Role(Role::Werewolf));
        self.discuss(&pack, self.config.night_discussion()).await?;
        self.set_scope(Scope::Silenced);
        // Late chatter must not become the decider's answer.
        self.drain_stale().await?;

        // Chosen after the discussion: the first werewolf may have left.
        let Some(decider) = self.roster.first_living_with_role(Role::Werewolf) else {
            return Ok(None);
        };
        for &wolf in &pack {
            if wolf != decider && self.is_alive(wolf) {
                self.notify(wolf, text::WEREWOLF_WAIT).await;
            }
        }

        self.notify(decider, text::WEREWOLF_DECIDE).await;
        let victim = self
            .choose_target(
                decider,
                Reprompt::always(text::WEREWOLF_RETRY),
                Eligible::NonWerewolf,
            )
            .await;
        tracing::debug!(%decider, ?victim, "werewolves chose");
        Ok(victim)
    }

    async fn guard_turn(&mut self, victim: Option<PlayerId>) -> Option<PlayerId> {
        let Some(guard) = self.roster.first_living_with_role(Role::Guard) else {
            return victim;
        };

        let others = self.names_where(|p| p.is_alive() && p.id() != guard);
        self.notify(guard, &format!("{}{others}", text::GUARD_PROMPT)).await;

        let protected = self
            .choose_target(guard, Reprompt::always(text::GUARD_RETRY), Eligible::AnyoneBut(guard))
            .await;
        if protected.is_some() && protected == victim {
            tracing::debug!(%guard, ?victim, "guard protected the victim");
            return None;
        }
        victim
    }

    async fn witch_save_turn(&mut self, victim: Option<PlayerId>) -> Option<PlayerId> {
        let Some(witch) = self.roster.first_living_with_role(Role::Witch) else {
            return victim;
        };

        let dying = victim.and_then(|id| self.roster.get(id)).map(|p| p.name());
        self.notify(witch, &text::witch_dying(dying)).await;
        if victim.is_none() {
            return None;
        }

        if !self.potions.has_save() {
            self.notify(witch, text::WITCH_SAVE_USED).await;
            return victim;
        }
        if self.ask_yes_no(witch, text::WITCH_SAVE_PROMPT).await {
            self.potions.use_save();
            tracing::debug!(%witch, ?victim, "witch saved the victim");
            return None;
        }
        victim
    }

    async fn witch_kill_turn(&mut self) -> Option<PlayerId> {
        let witch = self.roster.first_living_with_role(Role::Witch)?;

        if !self.potions.has_kill() {
            self.notify(witch, text::WITCH_KILL_USED).await;
            return None;
        }
        if !self.ask_yes_no(witch, text::WITCH_KILL_PROMPT).await {
            return None;
        }

        self.notify(witch, text::WITCH_KILL_TARGET).await;
        let target = self
            .choose_target(witch, NAME_MISS, Eligible::Anyone)
            .await?;
        self.potions.use_kill();
        tracing::debug!(%witch, %target, "witch poisoned");
        Some(target)
    }

    async fn hunter_turn(
        &mut self,
        werewolf_victim: Option<PlayerId>,
        witch_victim: Option<PlayerId>,
    ) -> Option<PlayerId> {
        let hunter = self.roster.first_living_with_role(Role::Hunter)?;

        let others = self.names_where(|p| p.is_alive() && p.id() != hunter);
        self.notify(hunter, &format!("{}{others}", text::HUNTER_PROMPT)).await;

        let mark = self
            .choose_target(hunter, NAME_MISS, Eligible::AnyoneBut(hunter))
            .await?;

        let dying = werewolf_victim == Some(hunter) || witch_victim == Some(hunter);
        dying.then_some(mark)
    }

    async fn announce_night(&mut self, report: &NightReport) -> Result<(), GameError> {
        let deaths = report.deaths();
        let mut names = Vec::with_capacity(deaths.len());
        for &id in &deaths {
            if self.is_alive(id) {
                self.roster.mark_status(id, Status::Dead)?;
            }
            if let Some(participant) = self.roster.get(id) {
                names.push(participant.name());
            }
        }

        let announcement = if names.is_empty() {
            text::PEACEFUL_NIGHT.to_string()
        } else {
            text::night_deaths(&names)
        };
        self.notify_all(&announcement).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_potion_works_once() {
        let mut potions = WitchPotions::new();
        assert!(potions.use_save());
        assert!(!potions.use_save());
        assert!(!potions.has_save());
        assert!(potions.has_kill());
        assert!(potions.use_kill());
        assert!(!potions.use_kill());
    }

    #[test]
    fn test_deaths_order_and_dedup() {
        let report = NightReport {
            inspected: None,
            werewolf_victim: Some(PlayerId(2)),
            witch_victim: Some(PlayerId(5)),
            hunter_victim: Some(PlayerId(2)),
        };
        assert_eq!(report.deaths(), vec![PlayerId(5), PlayerId(2)]);
    }

    #[test]
    fn test_empty_report_is_peaceful() {
        assert!(NightReport::default().is_peaceful());
    }
}
