use anyhow::{Context, bail};
use euchre_bot::policy::{HeuristicPolicy, Policy, PolicyContext};
use euchre_core::game::table::{GamePhase, Table, TableEvent};
use euchre_core::model::card::Card;
use euchre_core::model::score::HandOutcome;
use euchre_core::model::seat::{Seat, Team};
use euchre_core::model::suit::Suit;
use rand::rngs::StdRng;
use serde::Serialize;
use std::array;
use std::fmt;
use tracing::debug;

/// Redeals are rare and hands are bounded, so a finished game fits well
/// inside this many intents; hitting the cap means the engine stalled.
const MAX_STEPS: u32 = 100_000;

#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub winner: Team,
    pub scores: [u32; 2],
    pub hands: u32,
    pub marches: u32,
    pub euchres: u32,
    pub redeals: u32,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {}: {} win {}-{} in {} hands ({} marches, {} euchres, {} redeals)",
            self.seed,
            self.winner,
            self.scores[self.winner.index()],
            self.scores[self.winner.other().index()],
            self.hands,
            self.marches,
            self.euchres,
            self.redeals,
        )
    }
}

enum Intent {
    Pass,
    OrderUp,
    SelectTrump(Suit),
    Discard(Card),
    Play(Card),
}

/// Plays one complete game with a heuristic policy in every seat.
pub fn run_game(seed: u64) -> anyhow::Result<GameSummary> {
    let mut table = Table::with_seed(Seat::East, seed);
    let mut policies: [HeuristicPolicy<StdRng>; 4] =
        array::from_fn(|i| HeuristicPolicy::seeded(seed.wrapping_add(i as u64 + 1)));

    let mut marches = 0;
    let mut euchres = 0;
    let mut redeals = 0;

    for _ in 0..MAX_STEPS {
        let event = match table.phase() {
            GamePhase::GameOver => {
                let state = table.match_state();
                let winner = state.game_winner().context("finished game has a winner")?;
                return Ok(GameSummary {
                    seed,
                    winner,
                    scores: *state.scores().standings(),
                    hands: state.hands_played(),
                    marches,
                    euchres,
                    redeals,
                });
            }
            GamePhase::Idle => table.start_new_hand()?,
            _ => take_turn(&mut table, &mut policies)?,
        };
        debug!(%event, "table");

        match event {
            TableEvent::Redeal => redeals += 1,
            TableEvent::HandScored { score } => match score.outcome {
                HandOutcome::March => marches += 1,
                HandOutcome::Euchred => euchres += 1,
                HandOutcome::Made => {}
            },
            _ => {}
        }
    }
    bail!("game did not finish within {MAX_STEPS} intents");
}

/// Asks the active seat's policy for a decision and submits it.
fn take_turn(
    table: &mut Table,
    policies: &mut [HeuristicPolicy<StdRng>; 4],
) -> anyhow::Result<TableEvent> {
    let seat = table
        .active_seat()
        .context("an in-progress hand has an active seat")?;
    let round = table
        .match_state()
        .round()
        .context("an in-progress hand has a round")?;
    let ctx = PolicyContext::from_round(round, seat);
    let policy = &mut policies[seat.index()];

    let intent = match table.phase() {
        GamePhase::Bidding if ctx.upcard.is_some() => {
            if policy.should_order_up(&ctx) {
                Intent::OrderUp
            } else {
                Intent::Pass
            }
        }
        GamePhase::Bidding => match policy.call_trump(&ctx) {
            Some(suit) => Intent::SelectTrump(suit),
            None => Intent::Pass,
        },
        GamePhase::Discarding => Intent::Discard(policy.choose_discard(&ctx)),
        GamePhase::Playing => Intent::Play(policy.choose_play(&ctx)),
        phase @ (GamePhase::Idle | GamePhase::GameOver) => {
            bail!("no turn to take in the {phase:?} phase")
        }
    };

    let event = match intent {
        Intent::Pass => table.pass(),
        Intent::OrderUp => table.order_up(),
        Intent::SelectTrump(suit) => table.select_trump(suit),
        Intent::Discard(card) => table.discard(card),
        Intent::Play(card) => table.play_card(card),
    }?;
    Ok(event)
}
