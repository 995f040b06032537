use crate::model::bidding::{BidError, BidEvent, BiddingState};
use crate::model::card::Card;
use crate::model::deal::{Deal, DealError};
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::{Seat, Team};
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use std::fmt;

pub const TRICKS_PER_HAND: u8 = 5;

/// One hand of Euchre from the deal to the fifth trick.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    kitty: Vec<Card>,
    dealer: Seat,
    phase: RoundPhase,
    current_trick: Trick,
    trick_counts: [u8; 2],
    tricks_completed: u8,
}

#[derive(Debug, Clone)]
pub enum RoundPhase {
    Bidding(BiddingState),
    /// The dealer picked up the upcard and must come back down to five.
    Discarding { trump: Suit, maker: Seat },
    Playing { trump: Suit, maker: Seat },
    Complete { trump: Suit, maker: Seat },
    /// Everyone passed twice; the hand is void and must be redealt.
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: Seat },
    TrickCompleted { winner: Seat },
    HandCompleted { winner: Seat },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotPlaying,
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    MustFollowSuit(Suit),
    Trick(super::trick::TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotPlaying => write!(f, "no trick is being played"),
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit}"),
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Trick(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardError {
    NotDiscarding,
    NotDealer { dealer: Seat, actual: Seat },
    CardNotInHand(Card),
}

impl fmt::Display for DiscardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardError::NotDiscarding => write!(f, "no discard is pending"),
            DiscardError::NotDealer { dealer, actual } => {
                write!(f, "only the dealer ({dealer}) may discard, not {actual}")
            }
            DiscardError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
        }
    }
}

impl std::error::Error for DiscardError {}

impl RoundState {
    pub fn deal(deck: &Deck, dealer: Seat) -> Result<Self, DealError> {
        let (hands, upcard, kitty) = Deal::new(deck, dealer)?.into_parts();
        Ok(Self {
            hands,
            kitty,
            dealer,
            phase: RoundPhase::Bidding(BiddingState::new(dealer, upcard)),
            current_trick: Trick::new(dealer.next()),
            trick_counts: [0; 2],
            tricks_completed: 0,
        })
    }

    /// Builds a round already in the playing phase, for scripted setups.
    /// The seat left of the dealer leads the first trick.
    pub fn from_hands(hands: [Hand; 4], dealer: Seat, trump: Suit, maker: Seat) -> Self {
        Self {
            hands,
            kitty: Vec::new(),
            dealer,
            phase: RoundPhase::Playing { trump, maker },
            current_trick: Trick::new(dealer.next()),
            trick_counts: [0; 2],
            tricks_completed: 0,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_counts(&self) -> [u8; 2] {
        self.trick_counts
    }

    pub fn tricks_won(&self, team: Team) -> u8 {
        self.trick_counts[team.index()]
    }

    pub fn tricks_completed(&self) -> u8 {
        self.tricks_completed
    }

    pub fn bidding(&self) -> Option<&BiddingState> {
        match &self.phase {
            RoundPhase::Bidding(bidding) => Some(bidding),
            _ => None,
        }
    }

    /// The turned-up card while it is still on offer.
    pub fn upcard(&self) -> Option<Card> {
        self.bidding().and_then(BiddingState::offered_upcard)
    }

    pub fn turned_down(&self) -> Option<Suit> {
        self.bidding().and_then(BiddingState::turned_down)
    }

    pub fn trump(&self) -> Option<Suit> {
        match self.phase {
            RoundPhase::Discarding { trump, .. }
            | RoundPhase::Playing { trump, .. }
            | RoundPhase::Complete { trump, .. } => Some(trump),
            RoundPhase::Bidding(_) | RoundPhase::Dead => None,
        }
    }

    pub fn maker(&self) -> Option<Seat> {
        match self.phase {
            RoundPhase::Discarding { maker, .. }
            | RoundPhase::Playing { maker, .. }
            | RoundPhase::Complete { maker, .. } => Some(maker),
            RoundPhase::Bidding(_) | RoundPhase::Dead => None,
        }
    }

    pub fn active_seat(&self) -> Option<Seat> {
        match &self.phase {
            RoundPhase::Bidding(bidding) => bidding.active_seat(),
            RoundPhase::Discarding { .. } => Some(self.dealer),
            RoundPhase::Playing { .. } => Some(self.current_trick.expected_seat()),
            RoundPhase::Complete { .. } | RoundPhase::Dead => None,
        }
    }

    pub fn pass(&mut self, seat: Seat) -> Result<BidEvent, BidError> {
        let (event, upcard) = match &mut self.phase {
            RoundPhase::Bidding(bidding) => (bidding.pass(seat)?, bidding.upcard()),
            _ => return Err(BidError::NotBidding),
        };
        if event == BidEvent::AllPassed {
            self.kitty.push(upcard);
            self.phase = RoundPhase::Dead;
        }
        Ok(event)
    }

    pub fn order_up(&mut self, seat: Seat) -> Result<BidEvent, BidError> {
        let (event, upcard) = match &mut self.phase {
            RoundPhase::Bidding(bidding) => (bidding.order_up(seat)?, bidding.upcard()),
            _ => return Err(BidError::NotBidding),
        };
        if let BidEvent::OrderedUp { trump, maker } = event {
            self.hands[self.dealer.index()].add(upcard);
            self.phase = RoundPhase::Discarding { trump, maker };
        }
        Ok(event)
    }

    pub fn select_trump(&mut self, seat: Seat, suit: Suit) -> Result<BidEvent, BidError> {
        let (event, upcard) = match &mut self.phase {
            RoundPhase::Bidding(bidding) => (bidding.select_trump(seat, suit)?, bidding.upcard()),
            _ => return Err(BidError::NotBidding),
        };
        if let BidEvent::Selected { trump, maker } = event {
            self.kitty.push(upcard);
            self.begin_play(trump, maker);
        }
        Ok(event)
    }

    pub fn discard(&mut self, seat: Seat, card: Card) -> Result<(), DiscardError> {
        let (trump, maker) = match self.phase {
            RoundPhase::Discarding { trump, maker } => (trump, maker),
            _ => return Err(DiscardError::NotDiscarding),
        };
        if seat != self.dealer {
            return Err(DiscardError::NotDealer {
                dealer: self.dealer,
                actual: seat,
            });
        }
        if !self.hands[seat.index()].remove(card) {
            return Err(DiscardError::CardNotInHand(card));
        }
        self.kitty.push(card);
        self.begin_play(trump, maker);
        Ok(())
    }

    pub fn legal_plays(&self, seat: Seat) -> Vec<Card> {
        match self.phase {
            RoundPhase::Playing { .. } => self.current_trick.legal_plays(self.hand(seat)),
            _ => Vec::new(),
        }
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        let (trump, maker) = match self.phase {
            RoundPhase::Playing { trump, maker } => (trump, maker),
            _ => return Err(PlayError::NotPlaying),
        };

        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        let expected = self.current_trick.expected_seat();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if !self.current_trick.is_legal(self.hand(seat), card) {
            let led = self
                .current_trick
                .lead_suit()
                .expect("follow-suit rejection implies a led card");
            return Err(PlayError::MustFollowSuit(led));
        }

        self.current_trick
            .play(seat, card)
            .map_err(PlayError::Trick)?;
        self.hands[seat.index()].remove(card);

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played {
                next: self.current_trick.expected_seat(),
            });
        }

        let winner = self
            .current_trick
            .winner(trump)
            .expect("complete trick has a winner");
        self.trick_counts[winner.team().index()] += 1;
        self.tricks_completed += 1;

        if self.tricks_completed == TRICKS_PER_HAND {
            self.phase = RoundPhase::Complete { trump, maker };
            Ok(PlayOutcome::HandCompleted { winner })
        } else {
            self.current_trick = Trick::new(winner);
            Ok(PlayOutcome::TrickCompleted { winner })
        }
    }

    fn begin_play(&mut self, trump: Suit, maker: Seat) {
        self.current_trick = Trick::new(self.dealer.next());
        self.phase = RoundPhase::Playing { trump, maker };
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayError, PlayOutcome, RoundPhase, RoundState, TRICKS_PER_HAND};
    use crate::model::card::Card;
    use crate::model::deal::HAND_SIZE;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::seat::{Seat, Team};
    use crate::model::suit::Suit;

    fn suit_hand(suit: Suit) -> Hand {
        Hand::with_cards(
            [Rank::Nine, Rank::Ten, Rank::Queen, Rank::King, Rank::Ace]
                .iter()
                .map(|rank| Card::new(*rank, suit))
                .collect(),
        )
    }

    #[test]
    fn deal_enters_bidding_left_of_the_dealer() {
        let deck = Deck::shuffled_with_seed(5);
        let round = RoundState::deal(&deck, Seat::East).unwrap();
        assert!(matches!(round.phase(), RoundPhase::Bidding(_)));
        assert_eq!(round.active_seat(), Some(Seat::South));
        assert_eq!(round.trump(), None);
        assert!(round.upcard().is_some());
        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), HAND_SIZE);
        }
    }

    #[test]
    fn order_up_makes_the_dealer_pick_up_and_discard() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = RoundState::deal(&deck, Seat::East).unwrap();
        let upcard = round.upcard().unwrap();

        round.order_up(Seat::South).unwrap();
        assert!(matches!(round.phase(), RoundPhase::Discarding { .. }));
        assert_eq!(round.trump(), Some(upcard.suit));
        assert_eq!(round.maker(), Some(Seat::South));
        assert_eq!(round.active_seat(), Some(Seat::East));
        assert_eq!(round.hand(Seat::East).len(), HAND_SIZE + 1);
        assert!(round.hand(Seat::East).contains(upcard));

        let discard = round.hand(Seat::East).cards()[0];
        round.discard(Seat::East, discard).unwrap();
        assert_eq!(round.hand(Seat::East).len(), HAND_SIZE);
        assert!(matches!(round.phase(), RoundPhase::Playing { .. }));
        assert_eq!(round.active_seat(), Some(Seat::South));
        // Deal kitty plus the discard: every card stays accounted for.
        assert_eq!(round.kitty().len(), 4);
    }

    #[test]
    fn discarding_out_of_phase_is_rejected() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = RoundState::deal(&deck, Seat::East).unwrap();
        let card = round.hand(Seat::East).cards()[0];
        assert!(round.discard(Seat::East, card).is_err());
    }

    #[test]
    fn second_round_selection_starts_play() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = RoundState::deal(&deck, Seat::East).unwrap();
        let upcard_suit = round.upcard().unwrap().suit;
        for seat in [Seat::South, Seat::West, Seat::North, Seat::East] {
            round.pass(seat).unwrap();
        }
        assert_eq!(round.turned_down(), Some(upcard_suit));

        let trump = Suit::ALL
            .iter()
            .copied()
            .find(|s| *s != upcard_suit)
            .unwrap();
        round.select_trump(Seat::South, trump).unwrap();
        assert_eq!(round.trump(), Some(trump));
        assert_eq!(round.maker(), Some(Seat::South));
        assert!(matches!(round.phase(), RoundPhase::Playing { .. }));
        assert_eq!(round.hand(Seat::East).len(), HAND_SIZE);
        assert_eq!(round.kitty().len(), 4);
    }

    #[test]
    fn eight_passes_leave_a_dead_round() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = RoundState::deal(&deck, Seat::East).unwrap();
        for _ in 0..8 {
            let seat = round.active_seat().unwrap();
            round.pass(seat).unwrap();
        }
        assert!(matches!(round.phase(), RoundPhase::Dead));
        assert_eq!(round.active_seat(), None);
        assert_eq!(round.kitty().len(), 4);
    }

    #[test]
    fn must_follow_suit_when_able() {
        let hands = [
            Hand::with_cards(vec![
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::Nine, Suit::Clubs),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::Ten, Suit::Hearts),
                Card::new(Rank::Ace, Suit::Clubs),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::King, Suit::Diamonds),
                Card::new(Rank::Nine, Suit::Spades),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::Queen, Suit::Diamonds),
                Card::new(Rank::Ten, Suit::Spades),
            ]),
        ];
        let mut round = RoundState::from_hands(hands, Seat::East, Suit::Spades, Seat::South);

        round
            .play_card(Seat::South, Card::new(Rank::Ace, Suit::Hearts))
            .unwrap();
        let err = round
            .play_card(Seat::West, Card::new(Rank::Ace, Suit::Clubs))
            .unwrap_err();
        assert_eq!(err, PlayError::MustFollowSuit(Suit::Hearts));
        // The rejected play leaves the trick and the hand untouched.
        assert_eq!(round.current_trick().plays().len(), 1);
        assert_eq!(round.hand(Seat::West).len(), 2);
        round
            .play_card(Seat::West, Card::new(Rank::Ten, Suit::Hearts))
            .unwrap();
    }

    #[test]
    fn playing_out_of_turn_is_rejected() {
        let hands = [
            Hand::with_cards(vec![Card::new(Rank::Ace, Suit::Hearts)]),
            Hand::with_cards(vec![Card::new(Rank::Ten, Suit::Hearts)]),
            Hand::with_cards(vec![Card::new(Rank::King, Suit::Diamonds)]),
            Hand::with_cards(vec![Card::new(Rank::Queen, Suit::Diamonds)]),
        ];
        let mut round = RoundState::from_hands(hands, Seat::East, Suit::Spades, Seat::South);
        let err = round
            .play_card(Seat::West, Card::new(Rank::Ten, Suit::Hearts))
            .unwrap_err();
        assert!(matches!(err, PlayError::OutOfTurn { .. }));
    }

    #[test]
    fn five_tricks_complete_the_hand() {
        let hands = [
            suit_hand(Suit::Spades),
            suit_hand(Suit::Hearts),
            suit_hand(Suit::Clubs),
            suit_hand(Suit::Diamonds),
        ];
        let mut round = RoundState::from_hands(hands, Seat::East, Suit::Spades, Seat::South);

        for trick in 0..TRICKS_PER_HAND {
            for seat in [Seat::South, Seat::West, Seat::North, Seat::East] {
                let card = round.legal_plays(seat)[0];
                let outcome = round.play_card(seat, card).unwrap();
                if seat == Seat::East {
                    // South's trump lead takes every trick.
                    if trick + 1 == TRICKS_PER_HAND {
                        assert_eq!(outcome, PlayOutcome::HandCompleted { winner: Seat::South });
                    } else {
                        assert_eq!(outcome, PlayOutcome::TrickCompleted { winner: Seat::South });
                    }
                }
            }
        }

        assert!(matches!(round.phase(), RoundPhase::Complete { .. }));
        assert_eq!(round.tricks_won(Team::NorthSouth), TRICKS_PER_HAND);
        assert_eq!(round.tricks_won(Team::EastWest), 0);
        for seat in Seat::LOOP {
            assert!(round.hand(seat).is_empty());
        }
        assert_eq!(round.active_seat(), None);
    }
}
