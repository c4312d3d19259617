//! Forfeit resolution: what an unavailable player does to a fixture.

use crate::models::PlayerId;
use std::collections::HashSet;

/// Score awarded to the present side of a one-sided forfeit.
pub const FORFEIT_SCORE: u32 = 3;

/// How a fixture counts given the current availability set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureRuling {
    /// Neither player unavailable: the entered scores decide the fixture.
    Contested,
    /// Home unavailable: fixed 0-3, counts as played.
    HomeForfeit,
    /// Away unavailable: fixed 3-0, counts as played.
    AwayForfeit,
    /// Both unavailable: the fixture does not count at all (not even 0-0).
    NoContest,
}

impl FixtureRuling {
    /// The fixed (home, away) score pair for forfeit rulings; `None` for
    /// `Contested` (entered scores apply) and `NoContest` (nothing applies).
    pub fn fixed_scores(self) -> Option<(u32, u32)> {
        match self {
            FixtureRuling::HomeForfeit => Some((0, FORFEIT_SCORE)),
            FixtureRuling::AwayForfeit => Some((FORFEIT_SCORE, 0)),
            FixtureRuling::Contested | FixtureRuling::NoContest => None,
        }
    }
}

/// Decide how a fixture counts. Pure; must run before any score is
/// accumulated, and its ruling takes precedence over entered scores — an
/// unavailable player's stored scores are preserved but ignored until they
/// are marked available again.
pub fn resolve(home: PlayerId, away: PlayerId, unavailable: &HashSet<PlayerId>) -> FixtureRuling {
    match (unavailable.contains(&home), unavailable.contains(&away)) {
        (true, true) => FixtureRuling::NoContest,
        (true, false) => FixtureRuling::HomeForfeit,
        (false, true) => FixtureRuling::AwayForfeit,
        (false, false) => FixtureRuling::Contested,
    }
}
