use crate::model::seat::Team;

pub const GAME_TARGET: u32 = 10;

const BID_THRESHOLD: u8 = 3;
const MARCH_TRICKS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    Made,
    March,
    Euchred,
}

/// Points awarded for one completed hand, to `team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandScore {
    pub team: Team,
    pub points: u32,
    pub outcome: HandOutcome,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    pub fn winner(&self) -> Option<Team> {
        Team::ALL
            .iter()
            .copied()
            .find(|team| self.score(*team) >= GAME_TARGET)
    }

    /// Scores a finished hand: the makers take 1 point for 3 or 4 tricks,
    /// 2 for a march; anything less hands the defenders 2 for the euchre.
    pub fn apply_hand(&mut self, maker: Team, maker_tricks: u8) -> HandScore {
        let score = if maker_tricks >= BID_THRESHOLD {
            if maker_tricks >= MARCH_TRICKS {
                HandScore {
                    team: maker,
                    points: 2,
                    outcome: HandOutcome::March,
                }
            } else {
                HandScore {
                    team: maker,
                    points: 1,
                    outcome: HandOutcome::Made,
                }
            }
        } else {
            HandScore {
                team: maker.other(),
                points: 2,
                outcome: HandOutcome::Euchred,
            }
        };
        self.totals[score.team.index()] += score.points;
        score
    }
}
