//! Data structures for the tournament night: players, games, fixtures, state.

mod game;
mod player;
mod tournament;

pub use game::{
    default_games, parse_score, Fixture, Game, GroupLabel, Knockouts, KnockoutStage, Side,
    FIXTURES_PER_GROUP, GAME_COUNT, GROUP_SIZE, PAIRINGS,
};
pub use player::{default_roster, Player, PlayerId, PLAYER_COUNT};
pub use tournament::{normalize_games, GroupSlot, Tournament, TournamentError};
