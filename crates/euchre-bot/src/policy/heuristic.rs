use super::{Policy, PolicyContext};
use euchre_core::model::card::Card;
use euchre_core::model::ranking::{card_value, is_left_bower, is_right_bower, is_trump};
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::Trick;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{Level, event};

const BID_SUIT_MINIMUM: usize = 3;
/// A qualified first-round bid is still dropped this often, so the table
/// does not bid with machine regularity.
const BID_DECLINE_CHANCE: f64 = 0.2;
const SECOND_ROUND_BID_CHANCE: f64 = 0.7;
const TRUMP_LEAD_CHANCE: f64 = 0.7;

/// The original table opponent: sound mainline choices with a dose of
/// randomness. All randomness flows through the injected `Rng`, so a
/// seeded source replays a game move for move.
pub struct HeuristicPolicy<R: Rng> {
    rng: R,
}

impl HeuristicPolicy<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HeuristicPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn choose_lead(&mut self, ctx: &PolicyContext) -> Card {
        let trumps = ctx.hand.iter().copied().filter(|&c| is_trump(c, ctx.trump));
        if let Some(best_trump) = highest_by_value(trumps, ctx.trump) {
            if self.rng.gen_bool(TRUMP_LEAD_CHANCE) {
                return best_trump;
            }
        }
        highest_by_value(ctx.hand.iter().copied(), ctx.trump)
            .expect("a seat on lead holds at least one card")
    }

    fn choose_follow(&mut self, ctx: &PolicyContext, trick: &Trick, trump: Suit) -> Card {
        let led = trick.lead_suit().expect("a non-empty trick has a led suit");
        let follow: Vec<Card> = ctx.hand.iter().copied().filter(|c| c.suit == led).collect();

        if !follow.is_empty() {
            // Take the trick as cheaply as possible, or duck low.
            let target = trick
                .winning_play(trump)
                .map(|play| card_value(play.card, Some(trump)))
                .unwrap_or(0);
            let winners = follow
                .iter()
                .copied()
                .filter(|&c| card_value(c, Some(trump)) > target);
            if let Some(card) = lowest_by_value(winners, Some(trump)) {
                return card;
            }
            return lowest_by_value(follow.into_iter(), Some(trump))
                .expect("led-suit cards were just collected");
        }

        let trick_has_trump = trick
            .plays()
            .iter()
            .any(|play| is_trump(play.card, Some(trump)));
        if !trick_has_trump {
            let trumps = ctx.hand.iter().copied().filter(|&c| is_trump(c, Some(trump)));
            if let Some(card) = lowest_by_value(trumps, Some(trump)) {
                return card;
            }
        }
        lowest_by_value(ctx.hand.iter().copied(), Some(trump))
            .expect("a seat asked to play holds at least one card")
    }
}

impl<R: Rng> Policy for HeuristicPolicy<R> {
    fn should_order_up(&mut self, ctx: &PolicyContext) -> bool {
        let Some(upcard) = ctx.upcard else {
            return false;
        };
        let trump = upcard.suit;
        let qualified = ctx.hand.count_suit(trump) >= BID_SUIT_MINIMUM
            || ctx
                .hand
                .iter()
                .any(|&c| is_right_bower(c, trump) || is_left_bower(c, trump));
        let decision = qualified && !self.rng.gen_bool(BID_DECLINE_CHANCE);
        event!(
            Level::DEBUG,
            seat = %ctx.seat,
            trump = %trump,
            qualified,
            decision,
            "first-round bid"
        );
        decision
    }

    fn call_trump(&mut self, ctx: &PolicyContext) -> Option<Suit> {
        for suit in Suit::ALL {
            if ctx.turned_down == Some(suit) {
                continue;
            }
            if ctx.hand.count_suit(suit) >= BID_SUIT_MINIMUM
                && self.rng.gen_bool(SECOND_ROUND_BID_CHANCE)
            {
                event!(Level::DEBUG, seat = %ctx.seat, trump = %suit, "second-round bid");
                return Some(suit);
            }
        }
        event!(Level::DEBUG, seat = %ctx.seat, "second-round pass");
        None
    }

    fn choose_discard(&mut self, ctx: &PolicyContext) -> Card {
        let card = lowest_by_value(ctx.hand.iter().copied(), ctx.trump)
            .expect("the dealer holds six cards at discard time");
        event!(Level::DEBUG, seat = %ctx.seat, card = %card, "discard");
        card
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let card = match (ctx.trump, ctx.trick.filter(|t| !t.is_empty())) {
            (Some(trump), Some(trick)) => self.choose_follow(ctx, trick, trump),
            _ => self.choose_lead(ctx),
        };
        event!(Level::DEBUG, seat = %ctx.seat, card = %card, "play");
        card
    }
}

/// Ties go to the first card encountered, keeping decisions stable for a
/// given hand order.
fn highest_by_value(cards: impl Iterator<Item = Card>, trump: Option<Suit>) -> Option<Card> {
    cards.fold(None, |best, card| match best {
        Some(best) if card_value(card, trump) <= card_value(best, trump) => Some(best),
        _ => Some(card),
    })
}

fn lowest_by_value(cards: impl Iterator<Item = Card>, trump: Option<Suit>) -> Option<Card> {
    cards.fold(None, |best, card| match best {
        Some(best) if card_value(card, trump) >= card_value(best, trump) => Some(best),
        _ => Some(card),
    })
}
