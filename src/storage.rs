//! Local persistence, file export/import, and the CSV standings report.
//!
//! The whole tournament is one JSON document. The same snapshot shape is
//! used for the autosaved state file and for user-facing export downloads;
//! import accepts anything with a player list and a game list and rejects
//! the rest without touching current state.

use crate::logic::compute_standings;
use crate::models::{normalize_games, Game, GroupLabel, Player, PlayerId, Tournament};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Bumped when the snapshot shape changes; older state files are discarded
/// on load rather than misread.
pub const STATE_VERSION: u32 = 1;

/// Errors from persistence and import/export.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// Imported file has no player list.
    MissingPlayers,
    /// Imported file has no game list.
    MissingGames,
    Csv(csv::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "File error: {}", e),
            StorageError::Parse(e) => write!(f, "Could not read tournament file: {}", e),
            StorageError::MissingPlayers => write!(f, "Invalid tournament file: no player list"),
            StorageError::MissingGames => write!(f, "Invalid tournament file: no game list"),
            StorageError::Csv(e) => write!(f, "Report error: {}", e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Parse(e)
    }
}

impl From<csv::Error> for StorageError {
    fn from(e: csv::Error) -> Self {
        StorageError::Csv(e)
    }
}

/// Serialized snapshot: the state file on disk and the export download.
#[derive(Serialize)]
struct StateSnapshot<'a> {
    version: u32,
    exported_at: DateTime<Utc>,
    players: &'a [Player],
    unavailable: &'a HashSet<PlayerId>,
    games: &'a [Game],
}

impl<'a> StateSnapshot<'a> {
    fn of(tournament: &'a Tournament) -> Self {
        Self {
            version: STATE_VERSION,
            exported_at: Utc::now(),
            players: &tournament.players,
            unavailable: &tournament.unavailable,
            games: &tournament.games,
        }
    }
}

/// Incoming snapshot, with every field optional so validation can report
/// what is missing instead of a generic parse failure.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    players: Option<Vec<Player>>,
    #[serde(default)]
    unavailable: Option<HashSet<PlayerId>>,
    #[serde(default)]
    games: Option<Vec<Game>>,
}

impl RawSnapshot {
    fn into_tournament(self) -> Result<Tournament, StorageError> {
        let players = self.players.ok_or(StorageError::MissingPlayers)?;
        let games = self.games.ok_or(StorageError::MissingGames)?;
        Ok(Tournament {
            players,
            unavailable: self.unavailable.unwrap_or_default(),
            games: normalize_games(games),
        })
    }
}

/// Export the current state as pretty JSON (with version and timestamp).
pub fn export_json(tournament: &Tournament) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(&StateSnapshot::of(tournament))?)
}

/// Dated download name for an export, e.g. `tournament-2026-01-17.json`.
pub fn export_filename() -> String {
    format!("tournament-{}.json", Utc::now().format("%Y-%m-%d"))
}

/// Parse an imported file. Requires a player list and a game list; a
/// missing unavailable set defaults to empty, and the game list is padded
/// to the fixed 6-game shape.
pub fn import_state(text: &str) -> Result<Tournament, StorageError> {
    let raw: RawSnapshot = serde_json::from_str(text)?;
    raw.into_tournament()
}

/// Write the state file (autosaved after every successful mutation).
pub fn save(tournament: &Tournament, path: &Path) -> Result<(), StorageError> {
    fs::write(path, export_json(tournament)?)?;
    Ok(())
}

/// Load the state file, falling back to a fresh tournament when the file
/// is absent, unreadable, or from a different snapshot version. Never
/// fails: a scorekeeping night should start even with a bad save.
pub fn load_or_default(path: &Path) -> Tournament {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Tournament::new(),
        Err(e) => {
            log::warn!("Could not read state file {}: {}", path.display(), e);
            return Tournament::new();
        }
    };
    let snapshot: RawSnapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Discarding unreadable state file {}: {}", path.display(), e);
            return Tournament::new();
        }
    };
    if snapshot.version.unwrap_or(STATE_VERSION) != STATE_VERSION {
        log::warn!(
            "Discarding state file {} with unsupported version",
            path.display()
        );
        return Tournament::new();
    }
    match snapshot.into_tournament() {
        Ok(tournament) => tournament,
        Err(e) => {
            log::warn!("Discarding incomplete state file {}: {}", path.display(), e);
            Tournament::new()
        }
    }
}

/// One row of the standings report.
#[derive(Serialize)]
struct ReportRow<'a> {
    game: &'a str,
    group: &'static str,
    player: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    points: u32,
}

/// Render every group table across all games as CSV, ranked as displayed.
pub fn standings_csv(tournament: &Tournament) -> Result<String, StorageError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for game in &tournament.games {
        for label in GroupLabel::ALL {
            let standings = compute_standings(
                game.group(label),
                game.group_fixtures(label),
                &tournament.unavailable,
            );
            for standing in &standings {
                writer.serialize(ReportRow {
                    game: &game.name,
                    group: label.as_str(),
                    player: tournament.player_name(standing.player),
                    played: standing.played,
                    won: standing.won,
                    drawn: standing.drawn,
                    lost: standing.lost,
                    goals_for: standing.goals_for,
                    goals_against: standing.goals_against,
                    goal_difference: standing.goal_difference(),
                    points: standing.points,
                })?;
            }
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
