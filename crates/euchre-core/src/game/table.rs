use crate::game::match_state::MatchState;
use crate::model::bidding::{BidError, BidEvent};
use crate::model::card::Card;
use crate::model::round::{DiscardError, PlayError, PlayOutcome, RoundPhase, RoundState};
use crate::model::score::{HandOutcome, HandScore};
use crate::model::seat::{Seat, Team};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// In-process boundary between the engine and a presentation layer. Every
/// intent applies to the seat whose turn it is; the caller decides whether
/// that seat is a human or a policy and submits the same intents either
/// way. Rejected intents leave the table untouched.
#[derive(Debug, Clone)]
pub struct Table {
    match_state: MatchState,
    last_event: Option<TableEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Bidding,
    Discarding,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    HandDealt { dealer: Seat, upcard: Card },
    BidPassed { seat: Seat },
    TrumpTurnedDown { suit: Suit },
    Redeal,
    TrumpOrdered { seat: Seat, trump: Suit },
    TrumpSelected { seat: Seat, trump: Suit },
    Discarded { dealer: Seat },
    CardPlayed { seat: Seat, card: Card },
    TrickWon { seat: Seat },
    HandScored { score: HandScore },
    GameWon { team: Team },
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::HandDealt { dealer, upcard } => {
                write!(f, "{dealer} deals; {upcard} is turned up")
            }
            TableEvent::BidPassed { seat } => write!(f, "{seat} passes"),
            TableEvent::TrumpTurnedDown { suit } => {
                write!(f, "{suit} is turned down; second round of bidding")
            }
            TableEvent::Redeal => write!(f, "everyone passed; redealing"),
            TableEvent::TrumpOrdered { seat, trump } => {
                write!(f, "{seat} orders up {trump}")
            }
            TableEvent::TrumpSelected { seat, trump } => {
                write!(f, "{seat} names {trump} as trump")
            }
            TableEvent::Discarded { dealer } => write!(f, "{dealer} discards"),
            TableEvent::CardPlayed { seat, card } => write!(f, "{seat} plays {card}"),
            TableEvent::TrickWon { seat } => write!(f, "{seat} wins the trick"),
            TableEvent::HandScored { score } => match score.outcome {
                HandOutcome::Made => write!(f, "{} make the bid, +1 point", score.team),
                HandOutcome::March => write!(f, "{} take a march, +2 points", score.team),
                HandOutcome::Euchred => {
                    write!(f, "euchre! {} score 2 points", score.team)
                }
            },
            TableEvent::GameWon { team } => write!(f, "{team} win the game"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// The intent is not accepted in the current phase at all.
    InvalidPhase { phase: GamePhase },
    Bid(BidError),
    Discard(DiscardError),
    Play(PlayError),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::InvalidPhase { phase } => {
                write!(f, "intent not valid in the {phase:?} phase")
            }
            IntentError::Bid(err) => write!(f, "{err}"),
            IntentError::Discard(err) => write!(f, "{err}"),
            IntentError::Play(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IntentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntentError::InvalidPhase { .. } => None,
            IntentError::Bid(err) => Some(err),
            IntentError::Discard(err) => Some(err),
            IntentError::Play(err) => Some(err),
        }
    }
}

impl Table {
    pub fn new(dealer: Seat) -> Self {
        Self {
            match_state: MatchState::new(dealer),
            last_event: None,
        }
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        Self {
            match_state: MatchState::with_seed(dealer, seed),
            last_event: None,
        }
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn last_event(&self) -> Option<&TableEvent> {
        self.last_event.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        if self.match_state.game_winner().is_some() {
            return GamePhase::GameOver;
        }
        match self.match_state.round().map(|round| round.phase()) {
            None => GamePhase::Idle,
            Some(RoundPhase::Bidding(_)) => GamePhase::Bidding,
            Some(RoundPhase::Discarding { .. }) => GamePhase::Discarding,
            Some(RoundPhase::Playing { .. }) => GamePhase::Playing,
            // Complete and Dead rounds are resolved before an intent
            // returns, so a caller never observes them.
            Some(RoundPhase::Complete { .. } | RoundPhase::Dead) => GamePhase::Idle,
        }
    }

    pub fn active_seat(&self) -> Option<Seat> {
        self.match_state.round().and_then(|round| round.active_seat())
    }

    pub fn start_new_hand(&mut self) -> Result<TableEvent, IntentError> {
        if self.phase() != GamePhase::Idle {
            return Err(self.invalid_phase());
        }
        let round = self.match_state.deal_hand();
        let event = TableEvent::HandDealt {
            dealer: round.dealer(),
            upcard: round.upcard().expect("fresh deal has an upcard"),
        };
        Ok(self.record(event))
    }

    pub fn pass(&mut self) -> Result<TableEvent, IntentError> {
        let seat = self.acting_seat()?;
        let round = self.round_mut()?;
        let event = match round.pass(seat).map_err(IntentError::Bid)? {
            BidEvent::Passed { .. } => TableEvent::BidPassed { seat },
            BidEvent::TurnedDown { suit, .. } => TableEvent::TrumpTurnedDown { suit },
            BidEvent::AllPassed => {
                self.match_state.deal_hand();
                TableEvent::Redeal
            }
            BidEvent::OrderedUp { .. } | BidEvent::Selected { .. } => {
                unreachable!("pass never resolves trump")
            }
        };
        Ok(self.record(event))
    }

    pub fn order_up(&mut self) -> Result<TableEvent, IntentError> {
        let seat = self.acting_seat()?;
        let round = self.round_mut()?;
        match round.order_up(seat).map_err(IntentError::Bid)? {
            BidEvent::OrderedUp { trump, .. } => {
                Ok(self.record(TableEvent::TrumpOrdered { seat, trump }))
            }
            _ => unreachable!("order_up only resolves by ordering up"),
        }
    }

    pub fn select_trump(&mut self, suit: Suit) -> Result<TableEvent, IntentError> {
        let seat = self.acting_seat()?;
        let round = self.round_mut()?;
        match round.select_trump(seat, suit).map_err(IntentError::Bid)? {
            BidEvent::Selected { trump, .. } => {
                Ok(self.record(TableEvent::TrumpSelected { seat, trump }))
            }
            _ => unreachable!("select_trump only resolves by naming trump"),
        }
    }

    pub fn discard(&mut self, card: Card) -> Result<TableEvent, IntentError> {
        let seat = self.acting_seat()?;
        let round = self.round_mut()?;
        round.discard(seat, card).map_err(IntentError::Discard)?;
        let dealer = round.dealer();
        Ok(self.record(TableEvent::Discarded { dealer }))
    }

    pub fn play_card(&mut self, card: Card) -> Result<TableEvent, IntentError> {
        let seat = self.acting_seat()?;
        let round = self.round_mut()?;
        let event = match round.play_card(seat, card).map_err(IntentError::Play)? {
            PlayOutcome::Played { .. } => TableEvent::CardPlayed { seat, card },
            PlayOutcome::TrickCompleted { winner } => TableEvent::TrickWon { seat: winner },
            PlayOutcome::HandCompleted { .. } => {
                let score = self
                    .match_state
                    .finish_hand()
                    .expect("completed round scores");
                match self.match_state.game_winner() {
                    Some(team) => TableEvent::GameWon { team },
                    None => TableEvent::HandScored { score },
                }
            }
        };
        Ok(self.record(event))
    }

    fn acting_seat(&self) -> Result<Seat, IntentError> {
        self.active_seat().ok_or_else(|| self.invalid_phase())
    }

    fn round_mut(&mut self) -> Result<&mut RoundState, IntentError> {
        let phase = self.phase();
        self.match_state
            .round_mut()
            .ok_or(IntentError::InvalidPhase { phase })
    }

    fn invalid_phase(&self) -> IntentError {
        IntentError::InvalidPhase {
            phase: self.phase(),
        }
    }

    fn record(&mut self, event: TableEvent) -> TableEvent {
        self.last_event = Some(event);
        event
    }
}
