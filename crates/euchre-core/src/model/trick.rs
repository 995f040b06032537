use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::ranking::{card_value, is_trump};
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Cards from `hand` that may legally be played onto this trick: any
    /// card when leading, otherwise led-suit cards while the hand has them.
    pub fn legal_plays(&self, hand: &Hand) -> Vec<Card> {
        match self.lead_suit() {
            Some(led) if hand.has_suit(led) => {
                hand.iter().copied().filter(|c| c.suit == led).collect()
            }
            _ => hand.cards().to_vec(),
        }
    }

    pub fn is_legal(&self, hand: &Hand, card: Card) -> bool {
        match self.lead_suit() {
            Some(led) if hand.has_suit(led) => card.suit == led,
            _ => true,
        }
    }

    /// The play currently taking the trick; meaningful mid-trick for
    /// decision-making as well as at the end.
    pub fn winning_play(&self, trump: Suit) -> Option<&Play> {
        let led = self.lead_suit()?;
        let mut best = self.plays.first()?;
        for play in &self.plays[1..] {
            if beats(play.card, best.card, led, trump) {
                best = play;
            }
        }
        Some(best)
    }

    pub fn winner(&self, trump: Suit) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play(trump).map(|play| play.seat)
    }
}

fn beats(challenger: Card, best: Card, led: Suit, trump: Suit) -> bool {
    let challenger_trump = is_trump(challenger, Some(trump));
    let best_trump = is_trump(best, Some(trump));
    if challenger_trump != best_trump {
        return challenger_trump;
    }
    if challenger_trump {
        return card_value(challenger, Some(trump)) > card_value(best, Some(trump));
    }
    challenger.suit == led
        && (best.suit != led
            || card_value(challenger, Some(trump)) > card_value(best, Some(trump)))
}
