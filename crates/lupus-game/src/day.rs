//! The day phase: public discussion, then a vote.

use lupus_protocol::{PlayerId, Scope, Status, text};
use lupus_session::SessionError;
use lupus_transport::Connection;

use crate::{Game, GameError};

/// How the vote went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nobody had more votes than everyone else. Nobody dies.
    Tie,
    /// The unique leader, who dies.
    Eliminated(PlayerId),
}

impl Verdict {
    /// Picks the unique leader of `tally`.
    ///
    /// Any tie at the maximum is a [`Verdict::Tie`], as is a tally where
    /// nobody got a vote.
    pub fn decide(tally: &[(PlayerId, u32)]) -> Self {
        let Some(most) = tally.iter().map(|&(_, votes)| votes).max() else {
            return Verdict::Tie;
        };
        if most == 0 {
            return Verdict::Tie;
        }

        let mut leaders = tally.iter().filter(|&&(_, votes)| votes == most);
        match (leaders.next(), leaders.next()) {
            (Some(&(leader, _)), None) => Verdict::Eliminated(leader),
            _ => Verdict::Tie,
        }
    }
}

/// What one day resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub verdict: Verdict,
    /// Votes per seat, as cast.
    pub tally: Vec<(PlayerId, u32)>,
}

impl<C: Connection> Game<C> {
    /// Plays one day and applies its elimination.
    pub async fn play_day(&mut self) -> Result<DayReport, GameError> {
        tracing::info!(round = self.round(), "day breaks");
        self.drain_stale().await?;

        self.set_scope(Scope::Public);
        let briefing = text::day_briefing(self.config.day_discussion().as_secs());
        self.notify_all(&briefing).await;
        let everyone = self.roster.connected_ids();
        self.discuss(&everyone, self.config.day_discussion()).await?;
        self.set_scope(Scope::Silenced);

        let voters: Vec<PlayerId> = self.roster.living().map(|p| p.id()).collect();
        for voter in voters {
            if self.is_alive(voter) {
                self.collect_vote(voter).await?;
            }
        }

        let tally = self.roster.tally();
        let verdict = Verdict::decide(&tally);
        match verdict {
            Verdict::Tie => self.notify_all(text::VOTE_TIE).await,
            Verdict::Eliminated(id) => {
                if self.is_alive(id) {
                    self.roster.mark_status(id, Status::Dead)?;
                }
                if let Some((name, role)) = self.roster.get(id).map(|p| (p.name(), p.role())) {
                    tracing::info!(player = %id, name, %role, "voted out");
                    self.notify_all(&text::voted_out(name, role)).await;
                }
            }
        }
        self.roster.reset_votes();

        Ok(DayReport { verdict, tally })
    }

    /// Prompts `voter` until they name someone alive. A voter who drops out
    /// simply doesn't vote.
    ///
    /// Stale input is drained first, so a line typed after the discussion
    /// or while an earlier voter was deciding never counts as a vote.
    async fn collect_vote(&mut self, voter: PlayerId) -> Result<(), GameError> {
        self.drain_stale().await?;
        if !self.is_alive(voter) {
            return Ok(());
        }
        self.notify(voter, text::VOTE_PROMPT).await;
        while let Some(reply) = self.answer(voter).await {
            match self.roster.tally_vote(voter, &reply) {
                Ok(_) => return Ok(()),
                Err(SessionError::NoSuchTarget(name)) => {
                    tracing::debug!(%voter, %name, "vote for nobody alive");
                    self.notify(voter, text::VOTE_RETRY).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(votes: &[u32]) -> Vec<(PlayerId, u32)> {
        votes
            .iter()
            .enumerate()
            .map(|(seat, &v)| (PlayerId(seat), v))
            .collect()
    }

    #[test]
    fn test_unique_leader_is_eliminated() {
        assert_eq!(
            Verdict::decide(&tally(&[1, 3, 0, 2, 0, 1, 0])),
            Verdict::Eliminated(PlayerId(1))
        );
    }

    #[test]
    fn test_tie_at_the_top_spares_everyone() {
        assert_eq!(Verdict::decide(&tally(&[2, 0, 2, 1, 0, 0, 0])), Verdict::Tie);
    }

    #[test]
    fn test_tie_below_the_top_does_not_matter() {
        assert_eq!(
            Verdict::decide(&tally(&[1, 1, 3, 0, 0, 0, 0])),
            Verdict::Eliminated(PlayerId(2))
        );
    }

    #[test]
    fn test_no_votes_is_a_tie() {
        assert_eq!(Verdict::decide(&tally(&[0; 7])), Verdict::Tie);
        assert_eq!(Verdict::decide(&[]), Verdict::Tie);
    }
}
