//! Tournament state and edit operations.
//!
//! All mutation goes through the methods here; the derivations in
//! `crate::logic` only ever read this state.

use crate::models::game::{
    default_games, Game, GroupLabel, KnockoutStage, Side, FIXTURES_PER_GROUP, GAME_COUNT,
    GROUP_SIZE,
};
use crate::models::player::{default_roster, Player, PlayerId};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors that can occur during tournament edit operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Game index out of range (must be 0..6).
    GameNotFound(usize),
    /// Player id not in the roster.
    PlayerNotFound(PlayerId),
    /// Round-robin fixture index out of range (must be 0..6).
    FixtureNotFound(usize),
    /// Group slot does not hold a player.
    SlotNotFound { group: GroupLabel, slot: usize },
    /// Player names cannot be empty.
    EmptyPlayerName,
    /// Groups cannot be rearranged once results have been entered.
    GroupsLocked,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::GameNotFound(idx) => write!(f, "No game at index {}", idx),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::FixtureNotFound(idx) => write!(f, "No fixture at index {}", idx),
            TournamentError::SlotNotFound { group, slot } => {
                write!(f, "No player in group {} slot {}", group.as_str(), slot)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            TournamentError::GroupsLocked => {
                write!(f, "Groups cannot be changed once results are entered")
            }
        }
    }
}

/// A position in some game's group, for swaps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupSlot {
    pub game: usize,
    pub group: GroupLabel,
    pub slot: usize,
}

/// Full tournament state: the roster, who is unavailable this round, and
/// the 6 games. This is the one shared mutable resource; everything derived
/// (standings, brackets, the leaderboard) is recomputed from it on demand.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Ordered roster of 16 players.
    pub players: Vec<Player>,
    /// Players marked unavailable for the ongoing round. Affects forfeit
    /// resolution only; unavailable players stay in their groups.
    pub unavailable: HashSet<PlayerId>,
    /// The 6 games (activities), each its own mini-tournament.
    pub games: Vec<Game>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Fresh state: default roster, 6 empty games, nobody unavailable.
    pub fn new() -> Self {
        Self {
            players: default_roster(),
            unavailable: HashSet::new(),
            games: default_games(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Display name for a player id; empty string for dangling references
    /// (an imported group slot whose player is gone degrades, not panics).
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn is_unavailable(&self, id: PlayerId) -> bool {
        self.unavailable.contains(&id)
    }

    pub fn game(&self, index: usize) -> Result<&Game, TournamentError> {
        self.games.get(index).ok_or(TournamentError::GameNotFound(index))
    }

    fn game_mut(&mut self, index: usize) -> Result<&mut Game, TournamentError> {
        self.games
            .get_mut(index)
            .ok_or(TournamentError::GameNotFound(index))
    }

    /// Rename a player. Group slots hold ids, so every reference across all
    /// games shows the new name immediately; no stored score is touched.
    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        player.name = trimmed.to_string();
        Ok(())
    }

    /// Mark a player unavailable (or available again). Their entered scores
    /// are kept; standings simply ignore them while the flag is set.
    pub fn set_player_unavailable(
        &mut self,
        id: PlayerId,
        unavailable: bool,
    ) -> Result<(), TournamentError> {
        if self.player(id).is_none() {
            return Err(TournamentError::PlayerNotFound(id));
        }
        if unavailable {
            self.unavailable.insert(id);
        } else {
            self.unavailable.remove(&id);
        }
        Ok(())
    }

    /// Set a game's display name (e.g. "Pool", "Darts"). Stored as entered.
    pub fn set_game_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), TournamentError> {
        self.game_mut(index)?.name = name.into();
        Ok(())
    }

    /// Enter (or clear) one side of a round-robin fixture score.
    pub fn set_fixture_score(
        &mut self,
        game: usize,
        group: GroupLabel,
        fixture: usize,
        side: Side,
        score: Option<u32>,
    ) -> Result<(), TournamentError> {
        if fixture >= FIXTURES_PER_GROUP {
            return Err(TournamentError::FixtureNotFound(fixture));
        }
        let game = self.game_mut(game)?;
        game.fixtures[group.index()][fixture].set_score(side, score);
        Ok(())
    }

    /// Enter (or clear) one side of a knockout fixture score.
    pub fn set_knockout_score(
        &mut self,
        game: usize,
        stage: KnockoutStage,
        side: Side,
        score: Option<u32>,
    ) -> Result<(), TournamentError> {
        self.game_mut(game)?
            .knockouts
            .fixture_mut(stage)
            .set_score(side, score);
        Ok(())
    }

    /// Shuffle the roster into fresh groups for one game. Refused once the
    /// game has any round-robin result (reshuffling would re-target entered
    /// scores to different players).
    pub fn randomize_groups(&mut self, index: usize) -> Result<(), TournamentError> {
        if self.game(index)?.has_results() {
            return Err(TournamentError::GroupsLocked);
        }
        let groups = shuffled_groups(&self.players);
        self.game_mut(index)?.groups = groups;
        Ok(())
    }

    /// Shuffle every game's groups independently (used when setting up the
    /// whole night in one go).
    pub fn randomize_all_games(&mut self) {
        for index in 0..self.games.len() {
            self.games[index].groups = shuffled_groups(&self.players);
        }
    }

    /// Swap the players in two occupied group slots (possibly across groups
    /// or games). Refused for games that already have results.
    pub fn swap_players(&mut self, a: GroupSlot, b: GroupSlot) -> Result<(), TournamentError> {
        if self.game(a.game)?.has_results() || self.game(b.game)?.has_results() {
            return Err(TournamentError::GroupsLocked);
        }
        let first = self.slot_player(a)?;
        let second = self.slot_player(b)?;
        self.games[a.game].groups[a.group.index()][a.slot] = second;
        self.games[b.game].groups[b.group.index()][b.slot] = first;
        Ok(())
    }

    fn slot_player(&self, slot: GroupSlot) -> Result<PlayerId, TournamentError> {
        self.game(slot.game)?
            .group(slot.group)
            .get(slot.slot)
            .copied()
            .ok_or(TournamentError::SlotNotFound {
                group: slot.group,
                slot: slot.slot,
            })
    }

    /// Any round-robin result entered in the given game.
    pub fn game_has_results(&self, index: usize) -> Result<bool, TournamentError> {
        Ok(self.game(index)?.has_results())
    }

    /// Wipe everything back to defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Shuffle the roster and deal it into 4 groups of up to 4, in order.
/// With the standard 16-player roster every group gets exactly 4.
fn shuffled_groups(players: &[Player]) -> [Vec<PlayerId>; 4] {
    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.shuffle(&mut rand::thread_rng());
    let mut groups: [Vec<PlayerId>; 4] = Default::default();
    for (i, chunk) in ids.chunks(GROUP_SIZE).take(4).enumerate() {
        groups[i] = chunk.to_vec();
    }
    groups
}

/// Pad (or trim) a loaded game list to exactly `GAME_COUNT` entries, so the
/// fixed 6-game shape holds no matter what an old save or import contained.
pub fn normalize_games(mut games: Vec<Game>) -> Vec<Game> {
    while games.len() < GAME_COUNT {
        games.push(Game::new(games.len() + 1));
    }
    games.truncate(GAME_COUNT);
    games
}
