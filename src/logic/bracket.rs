//! Knockout bracket derivation: group winners → semi-finals → final.
//!
//! Nothing here is stored. Participants and winners are looked up from the
//! current fixture state on every call, so editing a group result reflows
//! the whole bracket.

use crate::logic::standings::{compute_standings, Standing};
use crate::models::{Fixture, Game, GroupLabel, PlayerId};
use std::collections::HashSet;

/// Both semi-final pairings of a game. Either side of a pairing is `None`
/// while that group has no determinable winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SemiPairings {
    /// Winner of group A vs winner of group B.
    pub semi1: (Option<PlayerId>, Option<PlayerId>),
    /// Winner of group C vs winner of group D.
    pub semi2: (Option<PlayerId>, Option<PlayerId>),
}

/// The winner of a group: its top-ranked standing, but only once that entry
/// has actually played a fixture. A group whose fixtures are all unplayed
/// has no winner, even though it has a ranked order.
pub fn group_winner(standings: &[Standing]) -> Option<PlayerId> {
    standings
        .first()
        .filter(|top| top.played > 0)
        .map(|top| top.player)
}

/// Winner of one of a game's groups, computed from current state.
pub fn game_group_winner(
    game: &Game,
    label: GroupLabel,
    unavailable: &HashSet<PlayerId>,
) -> Option<PlayerId> {
    let standings = compute_standings(game.group(label), game.group_fixtures(label), unavailable);
    group_winner(&standings)
}

/// Semi-final participants: A vs B and C vs D group winners.
pub fn semi_participants(game: &Game, unavailable: &HashSet<PlayerId>) -> SemiPairings {
    SemiPairings {
        semi1: (
            game_group_winner(game, GroupLabel::A, unavailable),
            game_group_winner(game, GroupLabel::B, unavailable),
        ),
        semi2: (
            game_group_winner(game, GroupLabel::C, unavailable),
            game_group_winner(game, GroupLabel::D, unavailable),
        ),
    }
}

/// Winner of a knockout fixture between two candidate participants.
///
/// Requires both scores entered; a tie yields no winner (the bracket cannot
/// progress past an exact tie). A decided fixture whose winning side has no
/// determined candidate also yields `None` — the fixture is "scored" but
/// nobody can advance from it yet.
pub fn knockout_winner(
    fixture: &Fixture,
    home_candidate: Option<PlayerId>,
    away_candidate: Option<PlayerId>,
) -> Option<PlayerId> {
    let (home, away) = (fixture.home?, fixture.away?);
    if home > away {
        home_candidate
    } else if away > home {
        away_candidate
    } else {
        None
    }
}

/// The final's participants: the winners of the two semi-finals.
pub fn final_participants(
    game: &Game,
    unavailable: &HashSet<PlayerId>,
) -> (Option<PlayerId>, Option<PlayerId>) {
    let semis = semi_participants(game, unavailable);
    (
        knockout_winner(&game.knockouts.semi1, semis.semi1.0, semis.semi1.1),
        knockout_winner(&game.knockouts.semi2, semis.semi2.0, semis.semi2.1),
    )
}

/// The winner of a game's final, if the bracket has resolved that far.
pub fn final_winner(game: &Game, unavailable: &HashSet<PlayerId>) -> Option<PlayerId> {
    let (finalist1, finalist2) = final_participants(game, unavailable);
    knockout_winner(&game.knockouts.final_match, finalist1, finalist2)
}
