//! Single binary web server: REST API over the tournament registry.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set DATA_DIR to keep tournament snapshots on disk; ID_POLICY=random for 4-digit ids.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use golf_match_play_web::{
    advance_round, end_tournament, parse_roster_csv, scoreboard, start_tournament, submit_score,
    CreateTournamentRequest, Registry, ServerConfig, SnapshotStore, SubmitScoreRequest, Teams,
    Tournament, TournamentError, TournamentSelector,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::RwLock;

/// Registry behind one lock: writers are serialized, readers see whole tournaments.
struct AppState {
    registry: RwLock<Registry>,
    store: Option<SnapshotStore>,
}

impl AppState {
    /// Write the tournament's snapshot, if a store is configured. This is a blocking file
    /// write made on the actix worker while the registry write lock is held, so every
    /// other request waits for it. Snapshots are small enough for that to be fine here.
    fn persist(&self, tournament: &Tournament) -> Result<(), golf_match_play_web::StoreError> {
        match &self.store {
            Some(store) => store.save(tournament),
            None => Ok(()),
        }
    }
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PairingBody {
    player_a: String,
    player_b: String,
}

#[derive(Deserialize)]
struct PairingsBody {
    pairings: Vec<PairingBody>,
}

#[derive(Deserialize)]
struct NoveltyBody {
    players: Vec<String>,
}

/// Path segment: tournament id or `latest` (e.g. /api/tournaments/{sel})
#[derive(Deserialize)]
struct TournamentPath {
    sel: TournamentSelector,
}

/// Path segments: tournament selector and novelty category.
#[derive(Deserialize)]
struct NoveltyPath {
    sel: TournamentSelector,
    category: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = json!({ "error": e.to_string() });
    match e {
        TournamentError::NotFound(_)
        | TournamentError::NoTournaments
        | TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::InvalidState { .. } => HttpResponse::Conflict().json(body),
        TournamentError::InvalidInput(_) | TournamentError::IdSpaceExhausted => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Run `f` against one tournament under the write lock, then persist the new snapshot.
/// If the snapshot cannot be written the in-memory change is rolled back.
fn mutate<F>(state: &AppState, selector: TournamentSelector, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<Value, TournamentError>,
{
    let mut g = match state.registry.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.resolve_mut(selector) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let before = t.clone();
    let body = match f(&mut *t) {
        Ok(body) => body,
        Err(e) => return error_response(&e),
    };
    if let Err(e) = state.persist(t) {
        log::error!("Tournament {}: {}", t.id, e);
        *t = before;
        return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
    }
    HttpResponse::Ok().json(body)
}

/// Run `f` against one tournament under the read lock.
fn read<F>(state: &AppState, selector: TournamentSelector, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> Value,
{
    let g = match state.registry.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.resolve(selector) {
        Ok(t) => HttpResponse::Ok().json(f(t)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "golf-match-play-web",
    })
}

/// Create a new tournament (inactive, round 1). Body fields are all optional.
#[post("/api/tournaments")]
async fn api_create_tournament(state: State, body: Option<Json<CreateTournamentRequest>>) -> HttpResponse {
    let request = body.map(Json::into_inner).unwrap_or_default();
    let mut g = match state.registry.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let previous_latest = g.latest_id();
    let tournament = match g.create(request) {
        Ok(t) => t.clone(),
        Err(e) => return error_response(&e),
    };
    if let Err(e) = state.persist(&tournament) {
        log::error!("Tournament {}: {}", tournament.id, e);
        g.discard(tournament.id, previous_latest);
        return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
    }
    log::info!("Created tournament {} ({})", tournament.id, tournament.name);
    HttpResponse::Created().json(tournament)
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: State) -> HttpResponse {
    let g = match state.registry.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.list())
}

#[get("/api/tournaments/{sel}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.sel, |t| json!(t))
}

/// Start accepting scores (inactive -> active; already active is reported, not an error).
#[post("/api/tournaments/{sel}/start")]
async fn api_start_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.sel, |t| {
        let outcome = start_tournament(t)?;
        Ok(json!({ "outcome": outcome, "tournament": t }))
    })
}

/// Finish the current round: next round, or close after the last one.
#[post("/api/tournaments/{sel}/rounds/next")]
async fn api_advance_round(state: State, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.sel, |t| {
        let round = advance_round(t)?;
        Ok(json!({ "round": round, "tournament": t }))
    })
}

/// Close the tournament early.
#[post("/api/tournaments/{sel}/end")]
async fn api_end_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.sel, |t| {
        end_tournament(t)?;
        Ok(json!(t))
    })
}

#[put("/api/tournaments/{sel}/teams")]
async fn api_set_teams(state: State, path: Path<TournamentPath>, body: Json<Teams>) -> HttpResponse {
    mutate(&state, path.sel, |t| {
        t.set_teams(body.into_inner())?;
        Ok(json!(t))
    })
}

/// Replace both rosters from a `team,player` CSV body.
#[post("/api/tournaments/{sel}/teams/csv")]
async fn api_import_roster(state: State, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let teams = match parse_roster_csv(&body) {
        Ok(teams) => teams,
        Err(e) => return error_response(&e),
    };
    mutate(&state, path.sel, |t| {
        t.set_teams(teams)?;
        Ok(json!(t))
    })
}

#[put("/api/tournaments/{sel}/pairings")]
async fn api_set_pairings(state: State, path: Path<TournamentPath>, body: Json<PairingsBody>) -> HttpResponse {
    let pairings = body
        .into_inner()
        .pairings
        .into_iter()
        .map(|p| (p.player_a, p.player_b))
        .collect();
    mutate(&state, path.sel, |t| {
        t.set_pairings(pairings)?;
        Ok(json!(t))
    })
}

#[put("/api/tournaments/{sel}/novelty/{category}")]
async fn api_set_novelty(state: State, path: Path<NoveltyPath>, body: Json<NoveltyBody>) -> HttpResponse {
    let path = path.into_inner();
    mutate(&state, path.sel, |t| {
        t.set_novelty(&path.category, body.into_inner().players)?;
        Ok(json!(t))
    })
}

/// Record one hole. Fields are checked before the tournament is touched.
#[post("/api/tournaments/{sel}/scores")]
async fn api_submit_score(state: State, path: Path<TournamentPath>, body: Json<SubmitScoreRequest>) -> HttpResponse {
    let entry = match body.validate() {
        Ok(entry) => entry,
        Err(e) => return error_response(&e),
    };
    mutate(&state, path.sel, |t| {
        let status = submit_score(t, &entry)?;
        Ok(json!({ "match_status": status, "scoreboard": scoreboard(t) }))
    })
}

#[get("/api/tournaments/{sel}/scoreboard")]
async fn api_scoreboard(state: State, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.sel, |t| json!(scoreboard(t)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let (registry, store) = match &config.data_dir {
        Some(dir) => {
            let store = SnapshotStore::open(dir).map_err(std::io::Error::other)?;
            let tournaments = store.load_all().map_err(std::io::Error::other)?;
            (Registry::from_tournaments(config.id_policy, tournaments), Some(store))
        }
        None => {
            log::info!("DATA_DIR not set, tournaments are kept in memory only");
            (Registry::new(config.id_policy), None)
        }
    };
    let state = Data::new(AppState {
        registry: RwLock::new(registry),
        store,
    });

    log::info!(
        "Starting server at http://{}:{} ({:?} tournament ids)",
        config.host,
        config.port,
        config.id_policy
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_start_tournament)
            .service(api_advance_round)
            .service(api_end_tournament)
            .service(api_set_teams)
            .service(api_import_roster)
            .service(api_set_pairings)
            .service(api_set_novelty)
            .service(api_submit_score)
            .service(api_scoreboard)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
