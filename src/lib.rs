//! Games night tournament tracker: library with models and derivation logic.

pub mod logic;
pub mod models;
pub mod print;
pub mod storage;

pub use logic::{
    compute_overall_standings, compute_standings, final_participants, final_winner,
    game_group_winner, group_winner, knockout_winner, resolve, semi_participants,
    tournament_champion, FixtureRuling, OverallEntry, SemiPairings, Standing, FORFEIT_SCORE,
};
pub use models::{
    parse_score, Fixture, Game, GroupLabel, GroupSlot, Knockouts, KnockoutStage, Player, PlayerId,
    Side, Tournament, TournamentError, FIXTURES_PER_GROUP, GAME_COUNT, GROUP_SIZE, PAIRINGS,
    PLAYER_COUNT,
};
pub use storage::{StorageError, STATE_VERSION};
