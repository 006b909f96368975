//! The role deck.

use lupus_protocol::Role;
use rand::Rng;
use rand::seq::SliceRandom;

/// The cards left to deal, in dealing order.
///
/// Every game uses exactly [`Role::DECK`]. Shuffling is a uniform random
/// permutation, so dealing one card per seat is a uniform random
/// bijection between seats and roles.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Role>,
}

impl Deck {
    /// A deck in [`Role::DECK`] order. Deterministic; mostly for tests.
    pub fn ordered() -> Self {
        Self {
            cards: Role::DECK.to_vec(),
        }
    }

    /// A deck in random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Role::DECK.to_vec();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Takes the next card, or `None` once every seat has been dealt.
    pub fn deal(&mut self) -> Option<Role> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Number of cards left.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sorted(mut roles: Vec<Role>) -> Vec<&'static str> {
        roles.sort_by_key(|r| r.as_str());
        roles.into_iter().map(Role::as_str).collect()
    }

    #[test]
    fn test_ordered_deck_deals_in_deck_order() {
        let mut deck = Deck::ordered();
        let dealt: Vec<Role> = std::iter::from_fn(|| deck.deal()).collect();
        assert_eq!(dealt, Role::DECK.to_vec());
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal().is_none());
    }

    #[test]
    fn test_shuffled_deck_is_a_permutation() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::shuffled(&mut rng);
            let dealt: Vec<Role> = std::iter::from_fn(|| deck.deal()).collect();
            assert_eq!(sorted(dealt), sorted(Role::DECK.to_vec()), "seed {seed}");
        }
    }

    #[test]
    fn test_shuffle_actually_varies() {
        let orders: std::collections::HashSet<Vec<&'static str>> = (0..30)
            .map(|seed| {
                let mut deck = Deck::shuffled(&mut StdRng::seed_from_u64(seed));
                std::iter::from_fn(|| deck.deal()).map(Role::as_str).collect()
            })
            .collect();
        assert!(orders.len() > 1, "30 seeds should not all give one order");
    }
}
