//! Game, Group, Fixture, and knockout data for one activity's mini-tournament.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Number of games (activities) in a tournament night.
pub const GAME_COUNT: usize = 6;

/// Players per group.
pub const GROUP_SIZE: usize = 4;

/// Round-robin fixtures per group: the 6 unique pairings among 4 positions.
pub const FIXTURES_PER_GROUP: usize = 6;

/// Fixed positional pairings, in play order. Fixtures pair group positions,
/// not names, so reshuffling a group re-targets every fixture.
pub const PAIRINGS: [(usize, usize); FIXTURES_PER_GROUP] =
    [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Group label within a game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GroupLabel {
    A,
    B,
    C,
    D,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; 4] = [GroupLabel::A, GroupLabel::B, GroupLabel::C, GroupLabel::D];

    /// Index into a game's `groups` / `fixtures` arrays.
    pub fn index(self) -> usize {
        match self {
            GroupLabel::A => 0,
            GroupLabel::B => 1,
            GroupLabel::C => 2,
            GroupLabel::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupLabel::A => "A",
            GroupLabel::B => "B",
            GroupLabel::C => "C",
            GroupLabel::D => "D",
        }
    }
}

/// Which knockout fixture of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutStage {
    Semi1,
    Semi2,
    Final,
}

/// Which side of a fixture a score belongs to (first-listed player is home).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// One fixture's entered scores; `None` means not yet entered.
///
/// Shared by round-robin and knockout fixtures: both are just a pair of
/// optional non-negative scores, participants are determined elsewhere
/// (group positions for round-robin, derived winners for knockouts).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

impl Fixture {
    /// Neither side entered yet.
    pub fn is_blank(&self) -> bool {
        self.home.is_none() && self.away.is_none()
    }

    /// Both sides entered.
    pub fn is_scored(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }

    pub fn set_score(&mut self, side: Side, score: Option<u32>) {
        match side {
            Side::Home => self.home = score,
            Side::Away => self.away = score,
        }
    }
}

/// Parse raw score input from the view layer: empty means "not entered",
/// anything non-numeric scores as 0.
pub fn parse_score(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse().unwrap_or(0))
}

/// The three knockout fixtures of a game. Participants are never stored
/// here; they are derived from group winners on every read.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Knockouts {
    pub semi1: Fixture,
    pub semi2: Fixture,
    #[serde(rename = "final")]
    pub final_match: Fixture,
}

impl Knockouts {
    pub fn fixture(&self, stage: KnockoutStage) -> &Fixture {
        match stage {
            KnockoutStage::Semi1 => &self.semi1,
            KnockoutStage::Semi2 => &self.semi2,
            KnockoutStage::Final => &self.final_match,
        }
    }

    pub fn fixture_mut(&mut self, stage: KnockoutStage) -> &mut Fixture {
        match stage {
            KnockoutStage::Semi1 => &mut self.semi1,
            KnockoutStage::Semi2 => &mut self.semi2,
            KnockoutStage::Final => &mut self.final_match,
        }
    }
}

/// One activity's mini-tournament: 4 groups, their round-robin fixtures,
/// and the knockout bracket scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    /// Indexed by `GroupLabel::index()`. Each group is empty (unassigned)
    /// or holds `GROUP_SIZE` player ids; positions are meaningful.
    pub groups: [Vec<PlayerId>; 4],
    /// Entered round-robin scores, `fixtures[group][pairing]`.
    pub fixtures: [[Fixture; FIXTURES_PER_GROUP]; 4],
    pub knockouts: Knockouts,
}

impl Game {
    /// Create an empty game named "Game {num}".
    pub fn new(num: usize) -> Self {
        Self {
            name: format!("Game {num}"),
            groups: Default::default(),
            fixtures: Default::default(),
            knockouts: Knockouts::default(),
        }
    }

    pub fn group(&self, label: GroupLabel) -> &[PlayerId] {
        &self.groups[label.index()]
    }

    pub fn group_fixtures(&self, label: GroupLabel) -> &[Fixture; FIXTURES_PER_GROUP] {
        &self.fixtures[label.index()]
    }

    /// Any round-robin score entered anywhere in this game. Knockout scores
    /// do not count: groups stay editable until group play starts.
    pub fn has_results(&self) -> bool {
        self.fixtures
            .iter()
            .flatten()
            .any(|fixture| !fixture.is_blank())
    }

    /// All 6 of a group's fixtures fully entered (used to gate showing the
    /// group winner's name in bracket slots).
    pub fn group_complete(&self, label: GroupLabel) -> bool {
        self.group_fixtures(label).iter().all(Fixture::is_scored)
    }
}

/// The default 6 empty games, "Game 1" through "Game 6".
pub fn default_games() -> Vec<Game> {
    (1..=GAME_COUNT).map(Game::new).collect()
}
