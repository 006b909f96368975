//! The win condition.

use std::fmt;

use lupus_protocol::text;
use lupus_session::Census;
use lupus_transport::Connection;

use crate::Game;

/// Where the game stands after a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nobody has won yet.
    Continue,
    /// Everyone is dead or gone.
    AllDead,
    /// No werewolf is left alive.
    VillagersWin,
    /// Werewolves are at least half of the living.
    WerewolvesWin,
}

impl Outcome {
    /// Applies the rules in order: nobody alive, then no werewolves, then
    /// werewolves holding at least half the living (rounded up).
    pub fn evaluate(census: Census) -> Self {
        let Census { alive, werewolves } = census;
        if alive == 0 {
            Outcome::AllDead
        } else if werewolves == 0 {
            Outcome::VillagersWin
        } else if werewolves >= alive.div_ceil(2) {
            Outcome::WerewolvesWin
        } else {
            Outcome::Continue
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Continue
    }

    /// The line everyone hears when the game ends this way.
    pub fn announcement(self) -> Option<&'static str> {
        match self {
            Outcome::Continue => None,
            Outcome::AllDead => Some(text::ALL_DEAD),
            Outcome::VillagersWin => Some(text::VILLAGERS_WIN),
            Outcome::WerewolvesWin => Some(text::WEREWOLVES_WIN),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Continue => write!(f, "continue"),
            Outcome::AllDead => write!(f, "all dead"),
            Outcome::VillagersWin => write!(f, "villagers win"),
            Outcome::WerewolvesWin => write!(f, "werewolves win"),
        }
    }
}

impl<C: Connection> Game<C> {
    /// Evaluates the roster and, if the game is over, tells everyone.
    pub async fn conclude(&mut self) -> Outcome {
        let census = self.roster.census();
        let outcome = Outcome::evaluate(census);
        if let Some(announcement) = outcome.announcement() {
            tracing::info!(%outcome, alive = census.alive, werewolves = census.werewolves, "game over");
            self.notify_all(announcement).await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census(alive: usize, werewolves: usize) -> Census {
        Census { alive, werewolves }
    }

    #[test]
    fn test_opening_table_continues() {
        assert_eq!(Outcome::evaluate(census(7, 2)), Outcome::Continue);
    }

    #[test]
    fn test_nobody_alive() {
        assert_eq!(Outcome::evaluate(census(0, 0)), Outcome::AllDead);
    }

    #[test]
    fn test_no_werewolves_left() {
        assert_eq!(Outcome::evaluate(census(4, 0)), Outcome::VillagersWin);
    }

    #[test]
    fn test_werewolf_half_rounds_up() {
        assert_eq!(Outcome::evaluate(census(5, 2)), Outcome::Continue);
        assert_eq!(Outcome::evaluate(census(5, 3)), Outcome::WerewolvesWin);
        assert_eq!(Outcome::evaluate(census(4, 2)), Outcome::WerewolvesWin);
        assert_eq!(Outcome::evaluate(census(3, 1)), Outcome::Continue);
        assert_eq!(Outcome::evaluate(census(1, 1)), Outcome::WerewolvesWin);
    }

    #[test]
    fn test_only_endings_are_announced() {
        assert_eq!(Outcome::Continue.announcement(), None);
        assert!(!Outcome::Continue.is_over());
        assert_eq!(
            Outcome::VillagersWin.announcement(),
            Some("Villagers win! All werewolves are dead.\n")
        );
    }
}
