//! Integration tests for group standings: scoring, forfeits, ranking.

use tournament_night_web::{
    compute_standings, group_winner, resolve, FixtureRuling, GroupLabel, PlayerId, Side, Standing,
    Tournament,
};

/// Fresh tournament with the first 4 roster players assigned to game 0
/// group A, in roster order.
fn with_group_a() -> Tournament {
    let mut t = Tournament::new();
    t.games[0].groups[0] = t.players.iter().take(4).map(|p| p.id).collect();
    t
}

fn group_a_ids(t: &Tournament) -> Vec<PlayerId> {
    t.games[0].group(GroupLabel::A).to_vec()
}

fn set_group_a_score(t: &mut Tournament, fixture: usize, home: u32, away: u32) {
    t.set_fixture_score(0, GroupLabel::A, fixture, Side::Home, Some(home))
        .unwrap();
    t.set_fixture_score(0, GroupLabel::A, fixture, Side::Away, Some(away))
        .unwrap();
}

fn standings_for_group_a(t: &Tournament) -> Vec<Standing> {
    let game = &t.games[0];
    compute_standings(
        game.group(GroupLabel::A),
        game.group_fixtures(GroupLabel::A),
        &t.unavailable,
    )
}

#[test]
fn full_group_scenario_ranks_leader_first() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    // Pairings in order: (0,1),(0,2),(0,3),(1,2),(1,3),(2,3)
    set_group_a_score(&mut t, 0, 3, 1);
    set_group_a_score(&mut t, 1, 2, 2);
    set_group_a_score(&mut t, 2, 1, 0);
    set_group_a_score(&mut t, 3, 0, 3);
    set_group_a_score(&mut t, 4, 2, 2);
    set_group_a_score(&mut t, 5, 1, 1);

    let standings = standings_for_group_a(&t);
    assert_eq!(standings.len(), 4);

    let leader = &standings[0];
    assert_eq!(leader.player, ids[0]);
    assert_eq!(leader.played, 3);
    assert_eq!(leader.won, 2);
    assert_eq!(leader.drawn, 1);
    assert_eq!(leader.lost, 0);
    assert_eq!(leader.goals_for, 6);
    assert_eq!(leader.goals_against, 3);
    assert_eq!(leader.points, 7);

    assert_eq!(group_winner(&standings), Some(ids[0]));

    // Full order: P1 (7), P3 (5), P4 (2), P2 (1).
    let order: Vec<PlayerId> = standings.iter().map(|s| s.player).collect();
    assert_eq!(order, vec![ids[0], ids[2], ids[3], ids[1]]);
}

#[test]
fn blank_fixtures_are_not_played() {
    let t = with_group_a();
    let standings = standings_for_group_a(&t);
    assert_eq!(standings.len(), 4);
    assert!(standings.iter().all(|s| s.played == 0 && s.points == 0));
    assert_eq!(group_winner(&standings), None);
}

#[test]
fn half_entered_fixture_counts_missing_side_as_zero() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    t.set_fixture_score(0, GroupLabel::A, 0, Side::Home, Some(2))
        .unwrap();

    let standings = standings_for_group_a(&t);
    let home = standings.iter().find(|s| s.player == ids[0]).unwrap();
    let away = standings.iter().find(|s| s.player == ids[1]).unwrap();
    assert_eq!(home.played, 1);
    assert_eq!(home.won, 1);
    assert_eq!(home.goals_for, 2);
    assert_eq!(away.played, 1);
    assert_eq!(away.lost, 1);
    assert_eq!(away.goals_against, 2);
}

#[test]
fn empty_group_yields_empty_standings() {
    let t = Tournament::new();
    assert!(standings_for_group_a(&t).is_empty());
}

#[test]
fn forfeit_resolution_is_deterministic() {
    let mut t = Tournament::new();
    let a = t.players[0].id;
    let b = t.players[1].id;
    assert_eq!(resolve(a, b, &t.unavailable), FixtureRuling::Contested);

    t.set_player_unavailable(a, true).unwrap();
    assert_eq!(resolve(a, b, &t.unavailable), FixtureRuling::HomeForfeit);
    assert_eq!(resolve(b, a, &t.unavailable), FixtureRuling::AwayForfeit);

    t.set_player_unavailable(b, true).unwrap();
    assert_eq!(resolve(a, b, &t.unavailable), FixtureRuling::NoContest);
}

#[test]
fn one_sided_forfeit_scores_three_nil() {
    // Two-player group: only the (0,1) pairing exists, so the deltas are
    // exactly one forfeit's worth.
    let mut t = Tournament::new();
    let a = t.players[0].id;
    let b = t.players[1].id;
    t.games[0].groups[0] = vec![a, b];
    t.set_player_unavailable(a, true).unwrap();

    let standings = standings_for_group_a(&t);
    let home = standings.iter().find(|s| s.player == a).unwrap();
    let away = standings.iter().find(|s| s.player == b).unwrap();
    assert_eq!((home.played, home.lost, home.goals_for, home.goals_against), (1, 1, 0, 3));
    assert_eq!((away.played, away.won, away.goals_for, away.goals_against), (1, 1, 3, 0));
    assert_eq!(away.points, 3);
    assert_eq!(home.points, 0);
}

#[test]
fn double_forfeit_is_no_contest() {
    let mut t = Tournament::new();
    let a = t.players[0].id;
    let b = t.players[1].id;
    t.games[0].groups[0] = vec![a, b];
    t.set_player_unavailable(a, true).unwrap();
    t.set_player_unavailable(b, true).unwrap();

    let standings = standings_for_group_a(&t);
    assert!(standings.iter().all(|s| s.played == 0));
    assert!(standings.iter().all(|s| s.points == 0));
}

#[test]
fn forfeit_overrides_entered_scores_without_erasing_them() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    set_group_a_score(&mut t, 0, 5, 0);

    t.set_player_unavailable(ids[0], true).unwrap();
    let standings = standings_for_group_a(&t);
    let home = standings.iter().find(|s| s.player == ids[0]).unwrap();
    // The entered 5-0 is ignored; all three of the absent player's
    // fixtures become 0-3 forfeits.
    assert_eq!(home.goals_for, 0);
    assert_eq!(home.goals_against, 9);
    assert_eq!(home.lost, 3);

    // Marking them available again brings the stored 5-0 back.
    t.set_player_unavailable(ids[0], false).unwrap();
    let standings = standings_for_group_a(&t);
    let home = standings.iter().find(|s| s.player == ids[0]).unwrap();
    assert_eq!(home.goals_for, 5);
    assert_eq!(home.won, 1);
    assert_eq!(home.played, 1);
}

#[test]
fn results_are_conserved_across_played_fixtures() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    for fixture in 0..6 {
        set_group_a_score(&mut t, fixture, (fixture as u32) % 3, 1);
    }
    // Two absentees: their mutual fixture is a no-contest, their other
    // fixtures one-sided forfeits. 5 of 6 fixtures count.
    t.set_player_unavailable(ids[2], true).unwrap();
    t.set_player_unavailable(ids[3], true).unwrap();

    let standings = standings_for_group_a(&t);
    let played: u32 = standings.iter().map(|s| s.played).sum();
    let results: u32 = standings.iter().map(|s| s.won + s.drawn + s.lost).sum();
    assert_eq!(played, 2 * 5);
    assert_eq!(results, 2 * 5);
    assert_eq!(played % 2, 0);
}

#[test]
fn level_players_keep_group_position_order() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    // Every fixture 1-1: everyone on 3 points, 3 for, 3 against.
    for fixture in 0..6 {
        set_group_a_score(&mut t, fixture, 1, 1);
    }
    let standings = standings_for_group_a(&t);
    let order: Vec<PlayerId> = standings.iter().map(|s| s.player).collect();
    assert_eq!(order, ids);
}

#[test]
fn goal_difference_then_goals_for_break_point_ties() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    // P1 beats P2 3-0, P3 beats P4 1-0: both winners on 3 points, but
    // P1 has the better goal difference.
    set_group_a_score(&mut t, 0, 3, 0);
    set_group_a_score(&mut t, 5, 1, 0);

    let standings = standings_for_group_a(&t);
    assert_eq!(standings[0].player, ids[0]);
    assert_eq!(standings[1].player, ids[2]);
}

#[test]
fn goals_for_breaks_equal_goal_difference() {
    let mut t = with_group_a();
    let ids = group_a_ids(&t);
    // Both winners +1 on goal difference, but P3 scored more.
    set_group_a_score(&mut t, 0, 1, 0);
    set_group_a_score(&mut t, 5, 2, 1);

    let standings = standings_for_group_a(&t);
    assert_eq!(standings[0].player, ids[2]);
    assert_eq!(standings[1].player, ids[0]);
}
