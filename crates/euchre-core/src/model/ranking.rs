//! Trump-aware card comparison. Everything that ranks cards (trick
//! evaluation, the dealer discard, the opponent policy) goes through
//! `card_value` so no two components can disagree.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

pub const RIGHT_BOWER_VALUE: u8 = 30;
pub const LEFT_BOWER_VALUE: u8 = 29;

/// Non-bower trump cards map to 23..=28, so the trump Ace (28) stays
/// strictly below the left bower.
const TRUMP_OFFSET: u8 = 14;

pub fn is_right_bower(card: Card, trump: Suit) -> bool {
    card.rank == Rank::Jack && card.suit == trump
}

pub fn is_left_bower(card: Card, trump: Suit) -> bool {
    card.rank == Rank::Jack && card.suit == trump.same_color_partner()
}

pub fn is_trump(card: Card, trump: Option<Suit>) -> bool {
    match trump {
        Some(trump) => card.suit == trump || is_left_bower(card, trump),
        None => false,
    }
}

/// Comparative value of a card within a single trump context. Before trump
/// is decided every card is worth its base rank.
pub fn card_value(card: Card, trump: Option<Suit>) -> u8 {
    let Some(trump) = trump else {
        return card.rank.value();
    };
    if is_right_bower(card, trump) {
        RIGHT_BOWER_VALUE
    } else if is_left_bower(card, trump) {
        LEFT_BOWER_VALUE
    } else if card.suit == trump {
        card.rank.value() + TRUMP_OFFSET
    } else {
        card.rank.value()
    }
}
