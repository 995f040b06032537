use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use std::fmt;

/// Two rounds of bidding over the turned-up card. The first round offers
/// the upcard's suit to each seat in turn; if everyone passes the card is
/// turned down and each seat may name any other suit. Four passes in the
/// second round kill the hand.
#[derive(Debug, Clone)]
pub struct BiddingState {
    dealer: Seat,
    active: Seat,
    upcard: Card,
    phase: BidPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidPhase {
    FirstRound,
    SecondRound,
    Resolved { trump: Suit, maker: Seat },
    AllPassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidEvent {
    Passed { next: Seat },
    TurnedDown { suit: Suit, next: Seat },
    OrderedUp { trump: Suit, maker: Seat },
    Selected { trump: Suit, maker: Seat },
    AllPassed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    NotBidding,
    OutOfTurn { expected: Seat, actual: Seat },
    NotFirstRound,
    NotSecondRound,
    TurnedDownSuit(Suit),
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::NotBidding => write!(f, "bidding has already concluded"),
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid next but got {actual}")
            }
            BidError::NotFirstRound => write!(f, "the upcard is no longer on offer"),
            BidError::NotSecondRound => write!(f, "trump cannot be named while the upcard is up"),
            BidError::TurnedDownSuit(suit) => {
                write!(f, "{suit} was turned down and cannot be named")
            }
        }
    }
}

impl std::error::Error for BidError {}

impl BiddingState {
    pub fn new(dealer: Seat, upcard: Card) -> Self {
        Self {
            dealer,
            active: dealer.next(),
            upcard,
            phase: BidPhase::FirstRound,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> BidPhase {
        self.phase
    }

    pub fn upcard(&self) -> Card {
        self.upcard
    }

    /// The upcard while it is still on offer.
    pub fn offered_upcard(&self) -> Option<Card> {
        matches!(self.phase, BidPhase::FirstRound).then_some(self.upcard)
    }

    /// The suit turned face down after a first round of passes.
    pub fn turned_down(&self) -> Option<Suit> {
        matches!(self.phase, BidPhase::SecondRound).then_some(self.upcard.suit)
    }

    pub fn active_seat(&self) -> Option<Seat> {
        match self.phase {
            BidPhase::FirstRound | BidPhase::SecondRound => Some(self.active),
            BidPhase::Resolved { .. } | BidPhase::AllPassed => None,
        }
    }

    pub fn pass(&mut self, seat: Seat) -> Result<BidEvent, BidError> {
        self.check_turn(seat)?;
        let dealer_has_passed = self.active == self.dealer;
        match self.phase {
            BidPhase::FirstRound if dealer_has_passed => {
                self.phase = BidPhase::SecondRound;
                self.active = self.dealer.next();
                Ok(BidEvent::TurnedDown {
                    suit: self.upcard.suit,
                    next: self.active,
                })
            }
            BidPhase::SecondRound if dealer_has_passed => {
                self.phase = BidPhase::AllPassed;
                Ok(BidEvent::AllPassed)
            }
            _ => {
                self.active = self.active.next();
                Ok(BidEvent::Passed { next: self.active })
            }
        }
    }

    pub fn order_up(&mut self, seat: Seat) -> Result<BidEvent, BidError> {
        self.check_turn(seat)?;
        if self.phase != BidPhase::FirstRound {
            return Err(BidError::NotFirstRound);
        }
        let trump = self.upcard.suit;
        self.phase = BidPhase::Resolved { trump, maker: seat };
        Ok(BidEvent::OrderedUp { trump, maker: seat })
    }

    pub fn select_trump(&mut self, seat: Seat, suit: Suit) -> Result<BidEvent, BidError> {
        self.check_turn(seat)?;
        if self.phase != BidPhase::SecondRound {
            return Err(BidError::NotSecondRound);
        }
        if suit == self.upcard.suit {
            return Err(BidError::TurnedDownSuit(suit));
        }
        self.phase = BidPhase::Resolved { trump: suit, maker: seat };
        Ok(BidEvent::Selected { trump: suit, maker: seat })
    }

    fn check_turn(&self, seat: Seat) -> Result<(), BidError> {
        match self.active_seat() {
            None => Err(BidError::NotBidding),
            Some(active) if active != seat => Err(BidError::OutOfTurn {
                expected: active,
                actual: seat,
            }),
            Some(_) => Ok(()),
        }
    }
}
