//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! State autosaves to TOURNAMENT_DATA_FILE (default tournament_state.json).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use tournament_night_web::{
    compute_overall_standings, compute_standings, group_winner, knockout_winner, parse_score,
    print, semi_participants, storage, tournament_champion, Fixture, GroupLabel, GroupSlot,
    KnockoutStage, PlayerId, Side, Tournament, TournamentError,
};

/// Shared app state: the one tournament, plus where to autosave it.
struct AppData {
    state: RwLock<Tournament>,
    data_file: PathBuf,
}

type AppState = Data<AppData>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct AvailabilityBody {
    unavailable: bool,
}

/// Raw score text from an input field; empty clears, non-numeric scores 0.
#[derive(Deserialize)]
struct ScoreBody {
    side: Side,
    score: String,
}

#[derive(Deserialize)]
struct SwapBody {
    a: GroupSlot,
    b: GroupSlot,
}

/// Path segment: player id (e.g. /api/players/{player_id}/name)
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

/// Path segment: game index (e.g. /api/games/{game}/randomize)
#[derive(Deserialize)]
struct GamePath {
    game: usize,
}

/// Path segments: one round-robin fixture of one group.
#[derive(Deserialize)]
struct FixturePath {
    game: usize,
    group: GroupLabel,
    fixture: usize,
}

/// Path segments: one knockout fixture of a game.
#[derive(Deserialize)]
struct KnockoutPath {
    game: usize,
    stage: KnockoutStage,
}

/// Derived view of one group: ranked table, winner, completeness.
#[derive(Serialize)]
struct GroupPayload {
    label: GroupLabel,
    players: Vec<SlotPayload>,
    standings: Vec<StandingPayload>,
    winner: Option<String>,
    complete: bool,
}

#[derive(Serialize)]
struct SlotPayload {
    id: PlayerId,
    name: String,
    unavailable: bool,
}

#[derive(Serialize)]
struct StandingPayload {
    player: PlayerId,
    name: String,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    points: u32,
}

/// Derived view of one knockout fixture: participants by name (when their
/// source rounds are decided), entered scores, and the winner if any.
#[derive(Serialize)]
struct KnockoutPayload {
    home: Option<String>,
    away: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
    winner: Option<String>,
}

#[derive(Serialize)]
struct GameDerivedPayload {
    index: usize,
    name: String,
    groups: Vec<GroupPayload>,
    semi1: KnockoutPayload,
    semi2: KnockoutPayload,
    #[serde(rename = "final")]
    final_match: KnockoutPayload,
}

#[derive(Serialize)]
struct OverallRowPayload {
    player: PlayerId,
    name: String,
    wins: u32,
}

#[derive(Serialize)]
struct OverallPayload {
    standings: Vec<OverallRowPayload>,
    champion: Option<String>,
}

/// Map edit errors onto HTTP: unknown targets are 404, the rest 400.
fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::GameNotFound(_) | TournamentError::PlayerNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Persist after a successful mutation. Failure is logged, never surfaced:
/// the in-memory state is already updated and the night goes on.
fn autosave(data: &AppData, tournament: &Tournament) {
    if let Err(e) = storage::save(tournament, &data.data_file) {
        log::warn!("Autosave to {} failed: {}", data.data_file.display(), e);
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-night-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Full raw state (players, availability, games).
#[get("/api/state")]
async fn api_state(data: AppState) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*t)
}

/// Rename a player; group slots reference ids, so the new name shows up
/// everywhere without touching any score.
#[put("/api/players/{player_id}/name")]
async fn api_rename_player(data: AppState, path: Path<PlayerPath>, body: Json<NameBody>) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.rename_player(path.player_id, body.name.clone()) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Mark a player unavailable (forfeits their remaining fixtures) or
/// available again (their stored scores come back into effect).
#[put("/api/players/{player_id}/availability")]
async fn api_set_availability(
    data: AppState,
    path: Path<PlayerPath>,
    body: Json<AvailabilityBody>,
) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.set_player_unavailable(path.player_id, body.unavailable) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Name a game after its activity (e.g. "Pool", "Darts", "Table Tennis").
#[put("/api/games/{game}/name")]
async fn api_set_game_name(data: AppState, path: Path<GamePath>, body: Json<NameBody>) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.set_game_name(path.game, body.name.clone()) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Enter one side of a round-robin fixture score.
#[put("/api/games/{game}/groups/{group}/fixtures/{fixture}")]
async fn api_set_fixture_score(
    data: AppState,
    path: Path<FixturePath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let score = parse_score(&body.score);
    match t.set_fixture_score(path.game, path.group, path.fixture, body.side, score) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Enter one side of a knockout fixture score.
#[put("/api/games/{game}/knockouts/{stage}")]
async fn api_set_knockout_score(
    data: AppState,
    path: Path<KnockoutPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let score = parse_score(&body.score);
    match t.set_knockout_score(path.game, path.stage, body.side, score) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Shuffle one game's groups (refused once it has results).
#[post("/api/games/{game}/randomize")]
async fn api_randomize_game(data: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.randomize_groups(path.game) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

/// Shuffle every game's groups independently.
#[post("/api/randomize-all")]
async fn api_randomize_all(data: AppState) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    t.randomize_all_games();
    autosave(&data, &t);
    HttpResponse::Ok().json(&*t)
}

/// Swap the players in two group slots.
#[post("/api/groups/swap")]
async fn api_swap_players(data: AppState, body: Json<SwapBody>) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.swap_players(body.a, body.b) {
        Ok(()) => {
            autosave(&data, &t);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(e),
    }
}

fn knockout_payload(
    t: &Tournament,
    fixture: &Fixture,
    home: Option<PlayerId>,
    away: Option<PlayerId>,
) -> KnockoutPayload {
    KnockoutPayload {
        home: home.map(|id| t.player_name(id).to_string()),
        away: away.map(|id| t.player_name(id).to_string()),
        home_score: fixture.home,
        away_score: fixture.away,
        winner: knockout_winner(fixture, home, away).map(|id| t.player_name(id).to_string()),
    }
}

/// Everything derived for one game: ranked group tables, group winners,
/// and the knockout bracket resolved as far as current scores allow.
#[get("/api/games/{game}/derived")]
async fn api_game_derived(data: AppState, path: Path<GamePath>) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let game = match t.game(path.game) {
        Ok(game) => game,
        Err(e) => return error_response(e),
    };

    let groups = GroupLabel::ALL
        .iter()
        .map(|&label| {
            let standings = compute_standings(
                game.group(label),
                game.group_fixtures(label),
                &t.unavailable,
            );
            let winner = group_winner(&standings).map(|id| t.player_name(id).to_string());
            GroupPayload {
                label,
                players: game
                    .group(label)
                    .iter()
                    .map(|&id| SlotPayload {
                        id,
                        name: t.player_name(id).to_string(),
                        unavailable: t.is_unavailable(id),
                    })
                    .collect(),
                standings: standings
                    .iter()
                    .map(|s| StandingPayload {
                        player: s.player,
                        name: t.player_name(s.player).to_string(),
                        played: s.played,
                        won: s.won,
                        drawn: s.drawn,
                        lost: s.lost,
                        goals_for: s.goals_for,
                        goals_against: s.goals_against,
                        goal_difference: s.goal_difference(),
                        points: s.points,
                    })
                    .collect(),
                winner,
                complete: game.group_complete(label),
            }
        })
        .collect();

    let semis = semi_participants(game, &t.unavailable);
    let finalist1 = knockout_winner(&game.knockouts.semi1, semis.semi1.0, semis.semi1.1);
    let finalist2 = knockout_winner(&game.knockouts.semi2, semis.semi2.0, semis.semi2.1);

    HttpResponse::Ok().json(GameDerivedPayload {
        index: path.game,
        name: game.name.clone(),
        groups,
        semi1: knockout_payload(&t, &game.knockouts.semi1, semis.semi1.0, semis.semi1.1),
        semi2: knockout_payload(&t, &game.knockouts.semi2, semis.semi2.0, semis.semi2.1),
        final_match: knockout_payload(&t, &game.knockouts.final_match, finalist1, finalist2),
    })
}

/// The cross-game leaderboard: final wins per player, champion on top.
#[get("/api/overall")]
async fn api_overall(data: AppState) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let standings = compute_overall_standings(&t)
        .into_iter()
        .map(|e| OverallRowPayload {
            player: e.player,
            name: t.player_name(e.player).to_string(),
            wins: e.wins,
        })
        .collect();
    let champion = tournament_champion(&t).map(|id| t.player_name(id).to_string());
    HttpResponse::Ok().json(OverallPayload {
        standings,
        champion,
    })
}

/// Download the full state as a dated JSON file.
#[get("/api/export")]
async fn api_export(data: AppState) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match storage::export_json(&t) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", storage::export_filename()),
            ))
            .body(json),
        Err(e) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Download every group table as CSV.
#[get("/api/export.csv")]
async fn api_export_csv(data: AppState) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match storage::standings_csv(&t) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"standings.csv\"",
            ))
            .body(csv),
        Err(e) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Replace the whole state with an uploaded export. Rejected files leave
/// current state untouched.
#[post("/api/import")]
async fn api_import(data: AppState, body: String) -> HttpResponse {
    let imported = match storage::import_state(&body) {
        Ok(tournament) => tournament,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    *t = imported;
    autosave(&data, &t);
    log::info!("Imported tournament state ({} players)", t.players.len());
    HttpResponse::Ok().json(&*t)
}

/// Wipe everything back to defaults (the UI confirms first).
#[post("/api/reset")]
async fn api_reset(data: AppState) -> HttpResponse {
    let mut t = match data.state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    t.reset();
    autosave(&data, &t);
    log::info!("Tournament state reset to defaults");
    HttpResponse::Ok().json(&*t)
}

/// Print-friendly fixture sheet, one page per game.
#[get("/print")]
async fn print_sheet(data: AppState) -> HttpResponse {
    let t = match data.state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(print::render_print_sheet(&t))
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let data_file = PathBuf::from(
        std::env::var("TOURNAMENT_DATA_FILE")
            .unwrap_or_else(|_| "tournament_state.json".to_string()),
    );
    let tournament = storage::load_or_default(&data_file);
    log::info!(
        "Loaded tournament state from {} ({} players, {} games)",
        data_file.display(),
        tournament.players.len(),
        tournament.games.len()
    );
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let data = Data::new(AppData {
        state: RwLock::new(tournament),
        data_file,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/", web::get().to(serve_index))
            .service(api_health)
            .service(favicon)
            .service(api_state)
            .service(api_rename_player)
            .service(api_set_availability)
            .service(api_set_game_name)
            .service(api_set_fixture_score)
            .service(api_set_knockout_score)
            .service(api_randomize_game)
            .service(api_randomize_all)
            .service(api_swap_players)
            .service(api_game_derived)
            .service(api_overall)
            .service(api_export)
            .service(api_export_csv)
            .service(api_import)
            .service(api_reset)
            .service(print_sheet)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
