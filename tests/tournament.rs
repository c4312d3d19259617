//! Integration tests for edit operations: renames, swaps, randomization,
//! score entry, reset.

use std::collections::HashSet;
use tournament_night_web::{
    parse_score, GroupLabel, GroupSlot, KnockoutStage, PlayerId, Side, Tournament,
    TournamentError, GAME_COUNT, GROUP_SIZE, PLAYER_COUNT,
};

fn assign_groups(t: &mut Tournament, game: usize) {
    let ids: Vec<PlayerId> = t.players.iter().map(|p| p.id).collect();
    for (g, chunk) in ids.chunks(4).enumerate() {
        t.games[game].groups[g] = chunk.to_vec();
    }
}

#[test]
fn new_tournament_has_default_shape() {
    let t = Tournament::new();
    assert_eq!(t.players.len(), PLAYER_COUNT);
    assert_eq!(t.players[0].name, "Player 1");
    assert_eq!(t.players[15].name, "Player 16");
    assert_eq!(t.games.len(), GAME_COUNT);
    assert_eq!(t.games[0].name, "Game 1");
    assert!(t.unavailable.is_empty());
    assert!(t.games.iter().all(|g| g.groups.iter().all(Vec::is_empty)));
}

#[test]
fn rename_updates_every_reference_and_no_score() {
    let mut t = Tournament::new();
    // The same player sits in two games' groups.
    assign_groups(&mut t, 0);
    assign_groups(&mut t, 3);
    let id = t.players[0].id;
    t.set_fixture_score(0, GroupLabel::A, 0, Side::Home, Some(4)).unwrap();

    t.rename_player(id, "Robin").unwrap();

    assert_eq!(t.player_name(id), "Robin");
    // Group slots still reference the same player in both games.
    assert_eq!(t.games[0].group(GroupLabel::A)[0], id);
    assert_eq!(t.games[3].group(GroupLabel::A)[0], id);
    // Stored scores untouched.
    assert_eq!(t.games[0].group_fixtures(GroupLabel::A)[0].home, Some(4));
}

#[test]
fn rename_trims_and_rejects_empty() {
    let mut t = Tournament::new();
    let id = t.players[0].id;
    t.rename_player(id, "  Alex  ").unwrap();
    assert_eq!(t.player_name(id), "Alex");
    assert_eq!(
        t.rename_player(id, "   "),
        Err(TournamentError::EmptyPlayerName)
    );
    let unknown = uuid::Uuid::new_v4();
    assert_eq!(
        t.rename_player(unknown, "Nobody"),
        Err(TournamentError::PlayerNotFound(unknown))
    );
}

#[test]
fn availability_requires_known_player() {
    let mut t = Tournament::new();
    let id = t.players[5].id;
    t.set_player_unavailable(id, true).unwrap();
    assert!(t.is_unavailable(id));
    t.set_player_unavailable(id, false).unwrap();
    assert!(!t.is_unavailable(id));

    let unknown = uuid::Uuid::new_v4();
    assert_eq!(
        t.set_player_unavailable(unknown, true),
        Err(TournamentError::PlayerNotFound(unknown))
    );
}

#[test]
fn randomize_deals_full_groups() {
    let mut t = Tournament::new();
    t.randomize_groups(2).unwrap();

    let game = &t.games[2];
    let mut seen: HashSet<PlayerId> = HashSet::new();
    for label in GroupLabel::ALL {
        assert_eq!(game.group(label).len(), GROUP_SIZE);
        seen.extend(game.group(label));
    }
    assert_eq!(seen.len(), PLAYER_COUNT);
    // Other games untouched.
    assert!(t.games[0].groups.iter().all(Vec::is_empty));
}

#[test]
fn randomize_is_refused_once_results_exist() {
    let mut t = Tournament::new();
    assign_groups(&mut t, 0);
    t.set_fixture_score(0, GroupLabel::A, 0, Side::Home, Some(1)).unwrap();
    assert_eq!(t.game_has_results(0), Ok(true));
    assert_eq!(t.randomize_groups(0), Err(TournamentError::GroupsLocked));

    // Knockout scores do not lock groups.
    let mut t = Tournament::new();
    assign_groups(&mut t, 0);
    t.set_knockout_score(0, KnockoutStage::Final, Side::Home, Some(1)).unwrap();
    assert_eq!(t.games[0].knockouts.fixture(KnockoutStage::Final).home, Some(1));
    assert_eq!(t.game_has_results(0), Ok(false));
    t.randomize_groups(0).unwrap();
}

#[test]
fn randomize_all_reshuffles_every_game() {
    let mut t = Tournament::new();
    t.randomize_all_games();
    for game in &t.games {
        let mut seen: HashSet<PlayerId> = HashSet::new();
        for group in &game.groups {
            assert_eq!(group.len(), GROUP_SIZE);
            seen.extend(group);
        }
        assert_eq!(seen.len(), PLAYER_COUNT);
    }
}

#[test]
fn swap_exchanges_two_slots() {
    let mut t = Tournament::new();
    assign_groups(&mut t, 0);
    let first = t.games[0].group(GroupLabel::A)[0];
    let second = t.games[0].group(GroupLabel::B)[2];

    t.swap_players(
        GroupSlot { game: 0, group: GroupLabel::A, slot: 0 },
        GroupSlot { game: 0, group: GroupLabel::B, slot: 2 },
    )
    .unwrap();

    assert_eq!(t.games[0].group(GroupLabel::A)[0], second);
    assert_eq!(t.games[0].group(GroupLabel::B)[2], first);
}

#[test]
fn swap_rejects_empty_slots_and_locked_games() {
    let mut t = Tournament::new();
    assign_groups(&mut t, 0);
    // Game 1 has no groups assigned.
    assert_eq!(
        t.swap_players(
            GroupSlot { game: 0, group: GroupLabel::A, slot: 0 },
            GroupSlot { game: 1, group: GroupLabel::A, slot: 0 },
        ),
        Err(TournamentError::SlotNotFound { group: GroupLabel::A, slot: 0 })
    );

    t.set_fixture_score(0, GroupLabel::B, 3, Side::Away, Some(2)).unwrap();
    assert_eq!(
        t.swap_players(
            GroupSlot { game: 0, group: GroupLabel::A, slot: 0 },
            GroupSlot { game: 0, group: GroupLabel::B, slot: 1 },
        ),
        Err(TournamentError::GroupsLocked)
    );
}

#[test]
fn score_entry_validates_indices() {
    let mut t = Tournament::new();
    assert_eq!(
        t.set_fixture_score(9, GroupLabel::A, 0, Side::Home, Some(1)),
        Err(TournamentError::GameNotFound(9))
    );
    assert_eq!(
        t.set_fixture_score(0, GroupLabel::A, 6, Side::Home, Some(1)),
        Err(TournamentError::FixtureNotFound(6))
    );
    assert_eq!(
        t.set_knockout_score(6, KnockoutStage::Semi1, Side::Home, Some(1)),
        Err(TournamentError::GameNotFound(6))
    );
}

#[test]
fn clearing_a_score_reverts_to_unset() {
    let mut t = Tournament::new();
    t.set_fixture_score(0, GroupLabel::C, 2, Side::Away, Some(3)).unwrap();
    assert_eq!(t.games[0].group_fixtures(GroupLabel::C)[2].away, Some(3));
    t.set_fixture_score(0, GroupLabel::C, 2, Side::Away, None).unwrap();
    assert!(t.games[0].group_fixtures(GroupLabel::C)[2].is_blank());
}

#[test]
fn reset_restores_defaults() {
    let mut t = Tournament::new();
    assign_groups(&mut t, 0);
    t.set_game_name(0, "Pool").unwrap();
    let id = t.players[0].id;
    t.set_player_unavailable(id, true).unwrap();
    t.set_fixture_score(0, GroupLabel::A, 0, Side::Home, Some(9)).unwrap();

    t.reset();

    assert_eq!(t.games[0].name, "Game 1");
    assert!(t.unavailable.is_empty());
    assert!(t.games[0].groups.iter().all(Vec::is_empty));
    assert!(!t.games[0].has_results());
    assert_eq!(t.players[0].name, "Player 1");
}

#[test]
fn score_parsing_matches_input_rules() {
    assert_eq!(parse_score(""), None);
    assert_eq!(parse_score("   "), None);
    assert_eq!(parse_score("7"), Some(7));
    assert_eq!(parse_score(" 3 "), Some(3));
    assert_eq!(parse_score("abc"), Some(0));
    assert_eq!(parse_score("-2"), Some(0));
}
