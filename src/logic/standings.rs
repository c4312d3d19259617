//! Group standings: aggregate fixture outcomes into ranked records.

use crate::logic::forfeit::{self, FixtureRuling};
use crate::models::{Fixture, PlayerId, FIXTURES_PER_GROUP, PAIRINGS};
use serde::Serialize;
use std::collections::HashSet;

/// Points for a round-robin win / draw.
const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;

/// One player's record within a group. Derived on every query, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub player: PlayerId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl Standing {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Compute ranked standings for one group.
///
/// Each of the 6 fixed pairings is taken in order: forfeits are resolved
/// first (a double no-contest is skipped outright), then a contested fixture
/// with nothing entered is skipped as not-yet-played, and anything else
/// counts with unentered sides scoring 0. Win = 3 points, draw = 1 each.
///
/// Ranking is a stable descending sort on points, then goal difference,
/// then goals for — players still level keep their group-position order.
///
/// An empty group yields an empty list; a short group (fewer than 4
/// assigned) skips the pairings that have no player, yielding partial
/// standings rather than an error.
pub fn compute_standings(
    group: &[PlayerId],
    fixtures: &[Fixture; FIXTURES_PER_GROUP],
    unavailable: &HashSet<PlayerId>,
) -> Vec<Standing> {
    if group.is_empty() {
        return Vec::new();
    }

    let mut standings: Vec<Standing> = group.iter().map(|&id| Standing::new(id)).collect();

    for (fixture, &(home_pos, away_pos)) in fixtures.iter().zip(PAIRINGS.iter()) {
        let (Some(&home), Some(&away)) = (group.get(home_pos), group.get(away_pos)) else {
            continue;
        };

        let ruling = forfeit::resolve(home, away, unavailable);
        let (home_score, away_score) = match ruling.fixed_scores() {
            Some(scores) => scores,
            None => {
                if ruling == FixtureRuling::NoContest || fixture.is_blank() {
                    continue;
                }
                (fixture.home.unwrap_or(0), fixture.away.unwrap_or(0))
            }
        };

        standings[home_pos].played += 1;
        standings[away_pos].played += 1;
        standings[home_pos].goals_for += home_score;
        standings[home_pos].goals_against += away_score;
        standings[away_pos].goals_for += away_score;
        standings[away_pos].goals_against += home_score;

        if home_score > away_score {
            standings[home_pos].won += 1;
            standings[home_pos].points += WIN_POINTS;
            standings[away_pos].lost += 1;
        } else if home_score < away_score {
            standings[away_pos].won += 1;
            standings[away_pos].points += WIN_POINTS;
            standings[home_pos].lost += 1;
        } else {
            standings[home_pos].drawn += 1;
            standings[away_pos].drawn += 1;
            standings[home_pos].points += DRAW_POINTS;
            standings[away_pos].points += DRAW_POINTS;
        }
    }

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference().cmp(&a.goal_difference()))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    standings
}
