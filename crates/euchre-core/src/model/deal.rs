use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use std::{array, fmt};

pub const HAND_SIZE: usize = 5;
pub const KITTY_SIZE: usize = 3;

/// Batch sizes for the first pass around the table; the second pass deals
/// the complement so every seat ends with five cards.
const FIRST_PASS: [usize; 4] = [2, 3, 2, 3];

/// One dealt hand: four hands of five, the turned-up trump candidate, and
/// the face-down kitty.
#[derive(Debug, Clone)]
pub struct Deal {
    hands: [Hand; 4],
    upcard: Card,
    kitty: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    InvalidDeckSize(usize),
    DuplicateCard(Card),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::InvalidDeckSize(size) => {
                write!(f, "expected a deck of {} cards, got {size}", Deck::SIZE)
            }
            DealError::DuplicateCard(card) => write!(f, "deck contains {card} more than once"),
        }
    }
}

impl std::error::Error for DealError {}

impl Deal {
    /// Deals 2-3-2-3 then 3-2-3-2 starting left of the dealer, consuming
    /// cards from the end of the deck, then turns up the next card.
    pub fn new(deck: &Deck, dealer: Seat) -> Result<Self, DealError> {
        let cards = deck.cards();
        if cards.len() != Deck::SIZE {
            return Err(DealError::InvalidDeckSize(cards.len()));
        }
        let mut seen = [false; Deck::SIZE];
        for card in cards {
            if seen[card.deck_index()] {
                return Err(DealError::DuplicateCard(*card));
            }
            seen[card.deck_index()] = true;
        }

        let mut remaining = cards.to_vec();
        let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());
        for pass in 0..2 {
            let mut seat = dealer.next();
            for batch in FIRST_PASS {
                let count = if pass == 0 { batch } else { HAND_SIZE - batch };
                for _ in 0..count {
                    let card = remaining.pop().expect("24-card deck covers the deal");
                    hands[seat.index()].add(card);
                }
                seat = seat.next();
            }
        }

        let upcard = remaining.pop().expect("24-card deck covers the upcard");
        Ok(Self {
            hands,
            upcard,
            kitty: remaining,
        })
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn upcard(&self) -> Card {
        self.upcard
    }

    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }

    pub fn into_parts(self) -> ([Hand; 4], Card, Vec<Card>) {
        (self.hands, self.upcard, self.kitty)
    }
}
