//! JSON API over a shared [`Store`]. Mounted by the `web` binary via [`configure`].
//!
//! Scoped routes take an optional `?tournament=<id>`; without it they act on
//! every player and match in the store.

use crate::export::standings_csv;
use crate::logic::{compute_standings, generate_pairings, report_match};
use crate::models::{MatchId, PlayerId, PlayerStanding, Scope, TournamentId};
use crate::store::{Store, StoreError};
use actix_web::{
    delete,
    error::InternalError,
    get, post,
    web::{self, Data, Json, Path, Query},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};

/// Shared store handle injected into every handler.
pub type AppState = Data<dyn Store>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ScopeQuery {
    tournament: Option<TournamentId>,
}

impl ScopeQuery {
    fn scope(&self) -> Scope {
        Scope::from(self.tournament)
    }
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Serialize)]
struct CreatedTournament {
    id: TournamentId,
    name: String,
}

#[derive(Serialize)]
struct CreatedPlayer {
    id: PlayerId,
    name: String,
}

/// Loose match report; see [`report_match`] for which combinations are recorded.
#[derive(Deserialize)]
struct ReportMatchBody {
    winner: Option<PlayerId>,
    loser: Option<PlayerId>,
    tie1: Option<PlayerId>,
    tie2: Option<PlayerId>,
}

#[derive(Serialize)]
struct ReportMatchResponse {
    recorded: bool,
    id: Option<MatchId>,
}

#[derive(Serialize)]
struct CountResponse {
    count: usize,
}

/// Standings row with its rank and derived totals.
#[derive(Serialize)]
struct StandingView<'a> {
    rank: usize,
    #[serde(flatten)]
    standing: &'a PlayerStanding,
    losses: u32,
    points: u32,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

/// Rejected query strings, paths and bodies answer 400 with the same JSON error shape.
fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let body = serde_json::json!({ "error": err.to_string() });
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn error_response(e: StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::UnknownPlayer(_) | StoreError::UnknownTournament(_) => {
            HttpResponse::NotFound().json(body)
        }
        StoreError::InvalidName => HttpResponse::BadRequest().json(body),
        StoreError::Unavailable(_) | StoreError::Database(_) => {
            log::error!("Store failure: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Store unavailable" }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-web",
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.get_ref().tournaments() {
        Ok(ts) => HttpResponse::Ok().json(ts),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NameBody>) -> HttpResponse {
    match state.get_ref().create_tournament(&body.name) {
        Ok(id) => {
            log::info!("Created tournament {} ({})", id, body.name.trim());
            HttpResponse::Ok().json(CreatedTournament {
                id,
                name: body.name.trim().to_string(),
            })
        }
        Err(e) => error_response(e),
    }
}

/// Remove all tournaments, their enrollments and their matches.
#[delete("/api/tournaments")]
async fn api_delete_tournaments(state: AppState) -> HttpResponse {
    match state.get_ref().delete_tournaments() {
        Ok(()) => {
            log::info!("Deleted all tournaments");
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

/// Enroll an already registered player in a tournament.
#[post("/api/tournaments/{id}/players/{player_id}")]
async fn api_enroll_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    match state.get_ref().enroll_player(path.player_id, path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.get_ref().players(query.scope()) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(e),
    }
}

/// Register a new player, enrolling them when a tournament is given.
#[post("/api/players")]
async fn api_register_player(
    state: AppState,
    query: Query<ScopeQuery>,
    body: Json<NameBody>,
) -> HttpResponse {
    let scope = query.scope();
    match state.get_ref().register_player(&body.name, scope) {
        Ok(id) => {
            log::info!("Registered player {} ({}) in {}", id, body.name.trim(), scope);
            HttpResponse::Ok().json(CreatedPlayer {
                id,
                name: body.name.trim().to_string(),
            })
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/players/count")]
async fn api_count_players(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.get_ref().count_players(query.scope()) {
        Ok(count) => HttpResponse::Ok().json(CountResponse { count }),
        Err(e) => error_response(e),
    }
}

#[delete("/api/players")]
async fn api_delete_players(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    let scope = query.scope();
    match state.get_ref().delete_players(scope) {
        Ok(()) => {
            log::info!("Deleted players in {}", scope);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/matches")]
async fn api_list_matches(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match state.get_ref().matches(query.scope()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(e),
    }
}

/// Report a match result. Malformed reports are accepted but not recorded.
#[post("/api/matches")]
async fn api_report_match(
    state: AppState,
    query: Query<ScopeQuery>,
    body: Json<ReportMatchBody>,
) -> HttpResponse {
    let b = body.into_inner();
    match report_match(state.get_ref(), query.scope(), b.winner, b.loser, b.tie1, b.tie2) {
        Ok(id) => HttpResponse::Ok().json(ReportMatchResponse {
            recorded: id.is_some(),
            id,
        }),
        Err(e) => error_response(e),
    }
}

#[delete("/api/matches")]
async fn api_delete_matches(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    let scope = query.scope();
    match state.get_ref().delete_matches(scope) {
        Ok(()) => {
            log::info!("Deleted matches in {}", scope);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match compute_standings(state.get_ref(), query.scope()) {
        Ok(standings) => {
            let rows: Vec<StandingView<'_>> = standings
                .iter()
                .enumerate()
                .map(|(i, s)| StandingView {
                    rank: i + 1,
                    standing: s,
                    losses: s.losses(),
                    points: s.points(),
                })
                .collect();
            HttpResponse::Ok().json(rows)
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/standings.csv")]
async fn api_standings_csv(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    let standings = match compute_standings(state.get_ref(), query.scope()) {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };
    match standings_csv(&standings) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "CSV export failed" }))
        }
    }
}

#[get("/api/pairings")]
async fn api_pairings(state: AppState, query: Query<ScopeQuery>) -> HttpResponse {
    match generate_pairings(state.get_ref(), query.scope()) {
        Ok(pairings) => HttpResponse::Ok().json(pairings),
        Err(e) => error_response(e),
    }
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(api_health)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_delete_tournaments)
        .service(api_enroll_player)
        .service(api_list_players)
        .service(api_register_player)
        .service(api_count_players)
        .service(api_delete_players)
        .service(api_list_matches)
        .service(api_report_match)
        .service(api_delete_matches)
        .service(api_standings)
        .service(api_standings_csv)
        .service(api_pairings);
}
