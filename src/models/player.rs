//! Player data structures and the default 16-player roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in group slots and lookups).
///
/// Group slots and the availability set reference players by id, so renaming
/// a player is a single-field edit: every reference resolves to the new
/// display name on the next read.
pub type PlayerId = Uuid;

/// Number of players in the tournament (4 groups of 4).
pub const PLAYER_COUNT: usize = 16;

/// A player in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// The default roster: "Player 1" through "Player 16".
pub fn default_roster() -> Vec<Player> {
    (1..=PLAYER_COUNT)
        .map(|n| Player::new(format!("Player {n}")))
        .collect()
}
