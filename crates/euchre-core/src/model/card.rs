use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Stable position of this card in the 24-card deck, 0..=23.
    pub const fn deck_index(self) -> usize {
        self.suit.index() * Rank::ORDERED.len() + (self.rank.value() - Rank::Nine.value()) as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn display_concatenates_rank_and_suit() {
        let card = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(card.to_string(), "10H");
    }

    #[test]
    fn deck_index_covers_all_cards_once() {
        let mut seen = [false; 24];
        for suit in Suit::ALL {
            for rank in Rank::ORDERED {
                let index = Card::new(rank, suit).deck_index();
                assert!(!seen[index]);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
