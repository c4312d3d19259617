//! Overall leaderboard: final wins tallied across all 6 games.

use crate::logic::bracket::final_winner;
use crate::models::{PlayerId, Tournament};
use serde::Serialize;

/// A player's tally of game-final wins.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OverallEntry {
    pub player: PlayerId,
    pub wins: u32,
}

/// Tally each game's final winner into a ranked leaderboard.
///
/// Every roster player starts at zero, in roster order; each decided final
/// adds one win. The sort is a stable descending sort on wins alone, so
/// tied players keep roster order, and players with no final win are
/// dropped from the result entirely.
pub fn compute_overall_standings(tournament: &Tournament) -> Vec<OverallEntry> {
    let mut entries: Vec<OverallEntry> = tournament
        .players
        .iter()
        .map(|p| OverallEntry {
            player: p.id,
            wins: 0,
        })
        .collect();

    for game in &tournament.games {
        if let Some(winner) = final_winner(game, &tournament.unavailable) {
            if let Some(entry) = entries.iter_mut().find(|e| e.player == winner) {
                entry.wins += 1;
            }
        }
    }

    entries.sort_by(|a, b| b.wins.cmp(&a.wins));
    entries.retain(|e| e.wins > 0);
    entries
}

/// The tournament champion: head of the leaderboard, once any final has
/// been decided.
pub fn tournament_champion(tournament: &Tournament) -> Option<PlayerId> {
    compute_overall_standings(tournament)
        .first()
        .map(|e| e.player)
}
