//! Derivations over tournament state: forfeits, standings, brackets, leaderboard.
//!
//! Everything in this module is a pure read of the state passed in. No
//! function here mutates, stores, or fails: degenerate input (empty groups,
//! unplayed fixtures, undetermined winners) resolves to `None` or an empty
//! list rather than an error.

mod bracket;
mod forfeit;
mod overall;
mod standings;

pub use bracket::{
    final_participants, final_winner, game_group_winner, group_winner, knockout_winner,
    semi_participants, SemiPairings,
};
pub use forfeit::{resolve, FixtureRuling, FORFEIT_SCORE};
pub use overall::{compute_overall_standings, tournament_champion, OverallEntry};
pub use standings::{compute_standings, Standing};
