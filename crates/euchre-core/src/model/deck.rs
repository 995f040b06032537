use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The 24-card Euchre deck: Nine through Ace in each suit.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub const SIZE: usize = 24;

    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(Self::SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Builds a deck from explicit cards, e.g. for scripted deals in tests.
    /// Size and uniqueness are checked at deal time, not here.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;

    #[test]
    fn standard_deck_has_24_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), Deck::SIZE);
        let mut seen = [false; Deck::SIZE];
        for card in deck.cards() {
            assert!(!seen[card.deck_index()]);
            seen[card.deck_index()] = true;
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = Deck::shuffled_with_seed(7);
        let mut seen = [false; Deck::SIZE];
        for card in deck.cards() {
            assert!(!seen[card.deck_index()]);
            seen[card.deck_index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }
}
