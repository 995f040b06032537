//! Drives complete games through the table facade with a deliberately
//! simple strategy: the first bidder always orders up, the dealer sheds
//! their first card, and every play is the first legal card. Dumb play
//! still has to reach a 10-point winner through the same transitions a
//! real client would use.

use euchre_core::game::table::{GamePhase, Table, TableEvent};
use euchre_core::model::score::GAME_TARGET;
use euchre_core::model::seat::Seat;

const MAX_STEPS: u32 = 20_000;

fn run_to_completion(seed: u64) -> (Table, u32) {
    let mut table = Table::with_seed(Seat::East, seed);
    let mut hands_dealt = 0;
    let mut expected_dealer = Seat::East;

    for _ in 0..MAX_STEPS {
        match table.phase() {
            GamePhase::GameOver => return (table, hands_dealt),
            GamePhase::Idle => {
                let event = table.start_new_hand().unwrap();
                let TableEvent::HandDealt { dealer, .. } = event else {
                    panic!("dealing reported {event:?}");
                };
                assert_eq!(dealer, expected_dealer);
                hands_dealt += 1;
            }
            GamePhase::Bidding => {
                table.order_up().unwrap();
            }
            GamePhase::Discarding => {
                let dealer = table.active_seat().unwrap();
                let card = table.match_state().round().unwrap().hand(dealer).cards()[0];
                table.discard(card).unwrap();
            }
            GamePhase::Playing => {
                let seat = table.active_seat().unwrap();
                let round = table.match_state().round().unwrap();
                assert_eq!(
                    round.trick_counts().iter().sum::<u8>(),
                    round.tricks_completed()
                );
                let card = round.legal_plays(seat)[0];
                let event = table.play_card(card).unwrap();
                if matches!(event, TableEvent::HandScored { .. }) {
                    // The next deal belongs to the next seat clockwise.
                    expected_dealer = table.match_state().dealer();
                }
            }
        }
    }
    panic!("game did not finish in {MAX_STEPS} steps");
}

#[test]
fn games_terminate_with_a_winner() {
    for seed in [1, 7, 1999] {
        let (table, hands_dealt) = run_to_completion(seed);
        let state = table.match_state();
        let winner = state.game_winner().expect("finished game has a winner");
        assert!(state.scores().score(winner) >= GAME_TARGET);
        assert!(state.scores().score(winner.other()) < GAME_TARGET);
        // 2 points per hand at best: reaching 10 takes at least 5 hands.
        assert!(state.hands_played() >= 5);
        assert!(hands_dealt >= state.hands_played());
    }
}

#[test]
fn finished_games_reject_further_intents() {
    let (mut table, _) = run_to_completion(11);
    assert_eq!(table.phase(), GamePhase::GameOver);
    assert_eq!(table.active_seat(), None);
    assert!(table.start_new_hand().is_err());
    assert!(table.pass().is_err());
}

#[test]
fn dealer_rotates_between_scored_hands() {
    let (table, _) = run_to_completion(5);
    let state = table.match_state();
    // The dealer button moved once per scored hand except the last, which
    // froze the table the moment the game ended.
    let expected =
        Seat::LOOP[(Seat::East.index() + (state.hands_played() as usize - 1)) % Seat::LOOP.len()];
    assert_eq!(state.dealer(), expected);
}
