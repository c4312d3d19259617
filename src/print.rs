//! Print-friendly fixture sheet: one page per game, groups plus knockout
//! bracket, with blank score boxes for unplayed fixtures so the sheet can
//! be filled in by hand.

use crate::logic::{knockout_winner, semi_participants};
use crate::models::{Fixture, GroupLabel, PlayerId, Tournament, PAIRINGS};

/// Escape user-entered text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn score_text(score: Option<u32>, show: bool) -> String {
    match score {
        Some(value) if show => value.to_string(),
        _ => String::new(),
    }
}

/// One "Name [ ] - [ ] Name" line. Scores are only printed when the
/// fixture is fully entered; half-entered fixtures print blank boxes.
fn match_line(home: &str, away: &str, fixture: &Fixture) -> String {
    let show = fixture.is_scored();
    format!(
        concat!(
            "<div class=\"match-line\">",
            "<span class=\"player-name right\">{home}</span>",
            "<span class=\"score-box\">{hs}</span>",
            "<span class=\"dash\">-</span>",
            "<span class=\"score-box\">{as_}</span>",
            "<span class=\"player-name\">{away}</span>",
            "</div>"
        ),
        home = home,
        away = away,
        hs = score_text(fixture.home, show),
        as_ = score_text(fixture.away, show),
    )
}

/// Bracket slot label: the derived participant's name once it is known and
/// its source round is complete, otherwise a placeholder like "A" or "SF1".
fn slot_label(
    tournament: &Tournament,
    participant: Option<PlayerId>,
    ready: bool,
    placeholder: &str,
) -> String {
    match participant {
        Some(id) if ready => escape_html(tournament.player_name(id)),
        _ => placeholder.to_string(),
    }
}

fn group_section(tournament: &Tournament, game_index: usize, label: GroupLabel) -> String {
    let game = &tournament.games[game_index];
    let group = game.group(label);
    if group.is_empty() {
        return String::new();
    }
    let names: Vec<String> = group
        .iter()
        .map(|&id| escape_html(tournament.player_name(id)))
        .collect();
    let mut out = format!(
        "<div class=\"group-column\"><h3>Group {}</h3><p class=\"players\"><strong>Players:</strong> {}</p>",
        label.as_str(),
        names.join(", ")
    );
    for (fixture, &(home_pos, away_pos)) in game.group_fixtures(label).iter().zip(PAIRINGS.iter()) {
        let (Some(home), Some(away)) = (names.get(home_pos), names.get(away_pos)) else {
            continue;
        };
        out.push_str(&match_line(home, away, fixture));
    }
    out.push_str("</div>");
    out
}

fn knockout_section(tournament: &Tournament, game_index: usize) -> String {
    let game = &tournament.games[game_index];
    let semis = semi_participants(game, &tournament.unavailable);
    let ko = &game.knockouts;

    let semi1_home = slot_label(
        tournament,
        semis.semi1.0,
        game.group_complete(GroupLabel::A),
        "A",
    );
    let semi1_away = slot_label(
        tournament,
        semis.semi1.1,
        game.group_complete(GroupLabel::B),
        "B",
    );
    let semi2_home = slot_label(
        tournament,
        semis.semi2.0,
        game.group_complete(GroupLabel::C),
        "C",
    );
    let semi2_away = slot_label(
        tournament,
        semis.semi2.1,
        game.group_complete(GroupLabel::D),
        "D",
    );
    let final_home = slot_label(
        tournament,
        knockout_winner(&ko.semi1, semis.semi1.0, semis.semi1.1),
        ko.semi1.is_scored(),
        "SF1",
    );
    let final_away = slot_label(
        tournament,
        knockout_winner(&ko.semi2, semis.semi2.0, semis.semi2.1),
        ko.semi2.is_scored(),
        "SF2",
    );

    format!(
        concat!(
            "<div class=\"knockout-section\"><h3>Knockout Stage</h3>",
            "<div class=\"semis\">",
            "<div class=\"semi\"><h4>Semi-Final 1 (A vs B)</h4>{semi1}</div>",
            "<div class=\"semi\"><h4>Semi-Final 2 (C vs D)</h4>{semi2}</div>",
            "</div>",
            "<div class=\"final\"><h4>FINAL</h4>{final_line}</div>",
            "</div>"
        ),
        semi1 = match_line(&semi1_home, &semi1_away, &ko.semi1),
        semi2 = match_line(&semi2_home, &semi2_away, &ko.semi2),
        final_line = match_line(&final_home, &final_away, &ko.final_match),
    )
}

const PRINT_STYLE: &str = "\
body { font-family: sans-serif; font-size: 12px; margin: 16px; }\n\
h2 { border-bottom: 2px solid #222; padding-bottom: 2px; }\n\
.group-container { display: flex; gap: 24px; margin-bottom: 10px; }\n\
.group-column { flex: 1; }\n\
.players { font-size: 11px; }\n\
.match-line { display: flex; align-items: center; gap: 4px; margin: 3px 0; }\n\
.player-name { width: 130px; overflow: hidden; white-space: nowrap; }\n\
.player-name.right { text-align: right; }\n\
.score-box { display: inline-block; width: 26px; height: 18px; border: 1px solid #222; text-align: center; }\n\
.dash { font-weight: bold; }\n\
.knockout-section { border: 2px solid #222; padding: 8px; margin-top: 12px; }\n\
.semis { display: flex; gap: 18px; }\n\
.semi { flex: 1; }\n\
.final { margin-top: 10px; padding: 6px; border: 2px solid #000; background: #fff9c4; }\n\
.page-break { page-break-after: always; }\n\
@media print { .no-print { display: none; } }\n";

/// Render the whole tournament as a printable fixture sheet.
pub fn render_print_sheet(tournament: &Tournament) -> String {
    let mut body = String::new();
    let game_count = tournament.games.len();
    for game_index in 0..game_count {
        let game = &tournament.games[game_index];
        let class = if game_index + 1 < game_count {
            "page-break"
        } else {
            ""
        };
        body.push_str(&format!(
            "<div class=\"{}\"><h2>{}</h2>",
            class,
            escape_html(&game.name)
        ));
        body.push_str("<div class=\"group-container\">");
        body.push_str(&group_section(tournament, game_index, GroupLabel::A));
        body.push_str(&group_section(tournament, game_index, GroupLabel::B));
        body.push_str("</div><div class=\"group-container\">");
        body.push_str(&group_section(tournament, game_index, GroupLabel::C));
        body.push_str(&group_section(tournament, game_index, GroupLabel::D));
        body.push_str("</div>");
        body.push_str(&knockout_section(tournament, game_index));
        body.push_str("</div>");
    }

    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\">",
            "<title>Fixtures &amp; Results</title>",
            "<style>{style}</style></head><body>",
            "<div class=\"no-print\"><button onclick=\"window.print()\">Print Fixtures</button> ",
            "<a href=\"/\">Back</a></div>",
            "{body}</body></html>"
        ),
        style = PRINT_STYLE,
        body = body,
    )
}
