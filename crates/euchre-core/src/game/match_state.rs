use crate::model::deck::Deck;
use crate::model::round::{RoundPhase, RoundState};
use crate::model::score::{HandScore, ScoreBoard};
use crate::model::seat::{Seat, Team};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A whole game to 10 points: scores, dealer rotation, and the hand in
/// progress, with one owned RNG so a seed reproduces the entire game.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    dealer: Seat,
    hands_played: u32,
    round: Option<RoundState>,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(dealer: Seat) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(dealer, seed)
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        Self {
            scores: ScoreBoard::new(),
            dealer,
            hands_played: 0,
            round: None,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut RoundState> {
        self.round.as_mut()
    }

    pub fn game_winner(&self) -> Option<Team> {
        self.scores.winner()
    }

    /// Shuffles a fresh deck and deals the next hand. Replaces any round in
    /// progress, so this is also the redeal path after an all-pass hand;
    /// the dealer does not move.
    pub fn deal_hand(&mut self) -> &RoundState {
        let deck = Deck::shuffled(&mut self.rng);
        let round =
            RoundState::deal(&deck, self.dealer).expect("freshly shuffled deck is complete");
        self.round.insert(round)
    }

    /// Applies scoring for a completed round, then rotates the dealer
    /// unless the game just ended. Returns `None` while the round is still
    /// being played.
    pub fn finish_hand(&mut self) -> Option<HandScore> {
        let round = self.round.as_ref()?;
        let &RoundPhase::Complete { maker, .. } = round.phase() else {
            return None;
        };
        let maker_team = maker.team();
        let score = self
            .scores
            .apply_hand(maker_team, round.tricks_won(maker_team));
        self.hands_played += 1;
        self.round = None;
        if self.scores.winner().is_none() {
            self.dealer = self.dealer.next();
        }
        Some(score)
    }
}
