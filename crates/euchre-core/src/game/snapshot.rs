use crate::game::table::{GamePhase, Table};
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// What one seat is allowed to see of the table: their own cards face up,
/// everyone else reduced to a count. This is the observation a renderer
/// works from after every intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableView {
    pub phase: GamePhase,
    pub dealer: Seat,
    pub active_seat: Option<Seat>,
    pub trump: Option<Suit>,
    pub upcard: Option<Card>,
    pub seats: Vec<SeatView>,
    pub trick: Vec<TrickPlay>,
    pub trick_counts: [u8; 2],
    pub scores: [u32; 2],
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatView {
    pub seat: Seat,
    pub card_count: usize,
    /// Present only for the viewer's own seat.
    pub cards: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

impl TableView {
    pub fn capture(table: &Table, viewer: Seat) -> Self {
        let state = table.match_state();
        let round = state.round();

        let seats = Seat::LOOP
            .iter()
            .map(|&seat| {
                let cards = round.map(|r| r.hand(seat).cards().to_vec()).unwrap_or_default();
                SeatView {
                    seat,
                    card_count: cards.len(),
                    cards: (seat == viewer).then_some(cards),
                }
            })
            .collect();

        let trick = round
            .map(|r| {
                r.current_trick()
                    .plays()
                    .iter()
                    .map(|play| TrickPlay {
                        seat: play.seat,
                        card: play.card,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            phase: table.phase(),
            dealer: round.map(|r| r.dealer()).unwrap_or_else(|| state.dealer()),
            active_seat: table.active_seat(),
            trump: round.and_then(|r| r.trump()),
            upcard: round.and_then(|r| r.upcard()),
            seats,
            trick,
            trick_counts: round.map(|r| r.trick_counts()).unwrap_or_default(),
            scores: *state.scores().standings(),
            message: table.last_event().map(ToString::to_string),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
