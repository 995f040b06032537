mod heuristic;

pub use heuristic::HeuristicPolicy;

use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::round::{RoundPhase, RoundState};
use euchre_core::model::seat::Seat;
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::Trick;

/// Public information the acting seat may consult: its own hand, the
/// trump situation, and the trick on the table. Nothing here reveals
/// another seat's cards.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub dealer: Seat,
    pub trump: Option<Suit>,
    /// The turned-up card while the first bidding round is open.
    pub upcard: Option<Card>,
    /// The suit turned down in the second bidding round.
    pub turned_down: Option<Suit>,
    /// The trick in progress during the playing phase.
    pub trick: Option<&'a Trick>,
}

impl<'a> PolicyContext<'a> {
    pub fn from_round(round: &'a RoundState, seat: Seat) -> Self {
        let trick = matches!(round.phase(), RoundPhase::Playing { .. })
            .then(|| round.current_trick());
        Self {
            seat,
            hand: round.hand(seat),
            dealer: round.dealer(),
            trump: round.trump(),
            upcard: round.upcard(),
            turned_down: round.turned_down(),
            trick,
        }
    }
}

/// Decision interface for a non-human seat. One method per intent the
/// engine can demand from a seat.
pub trait Policy {
    /// First bidding round: accept the upcard's suit as trump?
    fn should_order_up(&mut self, ctx: &PolicyContext) -> bool;

    /// Second bidding round: name a trump suit, or pass with `None`.
    fn call_trump(&mut self, ctx: &PolicyContext) -> Option<Suit>;

    /// The dealer's discard after picking up the upcard.
    fn choose_discard(&mut self, ctx: &PolicyContext) -> Card;

    /// The card to play on the current trick; must be legal for the hand.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Card;
}
