//! Single binary web server: the HTML page from templates/ and the session API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; see `volley_pickup_web::config` for the environment
//! variables (HOST, PORT, DATA_FILE, TIE_BREAK, MAX_TEAM_COUNT).

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use volley_pickup_web::{
    add_player, check_in_by_name, generate_teams, import_players, read_players_csv,
    register_player, update_player, write_players_csv, Config, DistributeError, JsonFileStore,
    MemoryStore, PlayerId, RosterError, RosterStore, SessionError, StoreError, TieBreak,
};

/// Shared server state: the roster store plus startup configuration.
struct AppState {
    store: Box<dyn RosterStore>,
    config: Config,
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: String,
    #[serde(default)]
    skill: f64,
}

#[derive(Deserialize)]
struct GenerateTeamsBody {
    team_count: usize,
    /// Falls back to the configured mode.
    tie_break: Option<TieBreak>,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

fn error_body(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn store_error_response(e: &StoreError) -> HttpResponse {
    match e {
        StoreError::Roster(RosterError::PlayerNotFound(_))
        | StoreError::Roster(RosterError::PlayerNameNotFound(_)) => {
            HttpResponse::NotFound().json(error_body(e))
        }
        StoreError::Roster(RosterError::DuplicatePlayerName(_)) => {
            HttpResponse::Conflict().json(error_body(e))
        }
        StoreError::Roster(_) => HttpResponse::BadRequest().json(error_body(e)),
        StoreError::Io(_) | StoreError::Serialization(_) | StoreError::Poisoned => {
            log::error!("Store failure: {}", e);
            HttpResponse::InternalServerError().json(error_body(e))
        }
    }
}

fn session_error_response(e: &SessionError) -> HttpResponse {
    match e {
        SessionError::Store(inner) => store_error_response(inner),
        SessionError::Distribute(DistributeError::InvalidTeamCount(_)) => {
            HttpResponse::BadRequest().json(error_body(e))
        }
    }
}

/// Run `op` against the store on actix's blocking pool (the file store does synchronous I/O
/// under its lock), then turn the result into a response with `respond`.
async fn with_store<T, F, R>(state: &State, op: F, respond: R) -> HttpResponse
where
    F: FnOnce(&dyn RosterStore) -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
    R: FnOnce(T) -> HttpResponse,
{
    let state = state.clone();
    match web::block(move || op(state.store.as_ref())).await {
        Ok(Ok(value)) => respond(value),
        Ok(Err(e)) => session_error_response(&e),
        Err(e) => {
            log::error!("Blocking store call failed: {}", e);
            HttpResponse::InternalServerError().json(error_body(e))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volley-pickup-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// All players in registration order.
#[get("/api/players")]
async fn api_list_players(state: State) -> HttpResponse {
    with_store(
        &state,
        |store| Ok(store.list_players()?),
        |players| HttpResponse::Ok().json(players),
    )
    .await
}

/// Admin registration with a skill (defaults to 0).
#[post("/api/players")]
async fn api_add_player(state: State, body: Json<PlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    with_store(
        &state,
        move |store| add_player(store, &body.name, body.skill),
        |player| HttpResponse::Created().json(player),
    )
    .await
}

/// Self-registration: name only, skill 0 until an admin sets it.
#[post("/api/register")]
async fn api_register(state: State, body: Json<NameBody>) -> HttpResponse {
    let body = body.into_inner();
    with_store(
        &state,
        move |store| register_player(store, &body.name),
        |player| HttpResponse::Created().json(player),
    )
    .await
}

/// Edit a player's name and skill.
#[put("/api/players/{player_id}")]
async fn api_update_player(
    state: State,
    path: Path<PlayerPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    let id = path.player_id;
    let body = body.into_inner();
    with_store(
        &state,
        move |store| update_player(store, id, &body.name, body.skill),
        |player| HttpResponse::Ok().json(player),
    )
    .await
}

/// Delete a player (and their check-in).
#[delete("/api/players/{player_id}")]
async fn api_remove_player(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let id = path.player_id;
    with_store(
        &state,
        move |store| Ok(store.remove_player(id)?),
        |()| HttpResponse::NoContent().finish(),
    )
    .await
}

/// Roster as CSV (id,name,skill).
#[get("/api/players/export")]
async fn api_export_players(state: State) -> HttpResponse {
    with_store(
        &state,
        |store| Ok(store.list_players()?),
        |players| {
            let mut buf = Vec::new();
            match write_players_csv(&players, &mut buf) {
                Ok(()) => HttpResponse::Ok()
                    .content_type("text/csv; charset=utf-8")
                    .body(buf),
                Err(e) => HttpResponse::InternalServerError().json(error_body(e)),
            }
        },
    )
    .await
}

/// Bulk upsert from a CSV body (name,skill with optional id).
#[post("/api/players/import")]
async fn api_import_players(state: State, body: web::Bytes) -> HttpResponse {
    let records = match read_players_csv(&body[..]) {
        Ok(records) => records,
        Err(e) => return HttpResponse::BadRequest().json(error_body(e)),
    };
    with_store(
        &state,
        move |store| import_players(store, records),
        |applied| HttpResponse::Ok().json(serde_json::json!({ "imported": applied })),
    )
    .await
}

/// Checked-in player ids.
#[get("/api/checkins")]
async fn api_list_checkins(state: State) -> HttpResponse {
    with_store(
        &state,
        |store| Ok(store.list_checked_in()?),
        |ids| HttpResponse::Ok().json(ids),
    )
    .await
}

/// Self check-in by typed name.
#[post("/api/checkin")]
async fn api_check_in_by_name(state: State, body: Json<NameBody>) -> HttpResponse {
    let body = body.into_inner();
    with_store(
        &state,
        move |store| check_in_by_name(store, &body.name),
        |player| HttpResponse::Ok().json(player),
    )
    .await
}

/// Admin check-in of a listed player.
#[put("/api/checkins/{player_id}")]
async fn api_check_in(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let id = path.player_id;
    with_store(
        &state,
        move |store| Ok(store.set_checked_in(id, true)?),
        |()| HttpResponse::NoContent().finish(),
    )
    .await
}

#[delete("/api/checkins/{player_id}")]
async fn api_check_out(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let id = path.player_id;
    with_store(
        &state,
        move |store| Ok(store.set_checked_in(id, false)?),
        |()| HttpResponse::NoContent().finish(),
    )
    .await
}

/// Reset all check-ins for a new session.
#[delete("/api/checkins")]
async fn api_clear_checkins(state: State) -> HttpResponse {
    with_store(
        &state,
        |store| Ok(store.clear_all_check_ins()?),
        |()| {
            log::info!("Cleared all check-ins");
            HttpResponse::NoContent().finish()
        },
    )
    .await
}

/// Generate balanced teams from the checked-in players.
#[post("/api/teams")]
async fn api_generate_teams(state: State, body: Json<GenerateTeamsBody>) -> HttpResponse {
    let max = state.config.max_team_count;
    let team_count = body.team_count;
    if team_count > max {
        return HttpResponse::BadRequest().json(error_body(format!(
            "Team count must be at most {} (got {})",
            max, team_count
        )));
    }
    let tie_break = body.tie_break.unwrap_or(state.config.tie_break);
    with_store(
        &state,
        move |store| generate_teams(store, team_count, tie_break, &mut rand::thread_rng()),
        |distribution| HttpResponse::Ok().json(distribution),
    )
    .await
}

/// Last generated teams (404 if none yet).
#[get("/api/teams")]
async fn api_last_teams(state: State) -> HttpResponse {
    with_store(
        &state,
        |store| Ok(store.last_distribution()?),
        |last| match last {
            Some(distribution) => HttpResponse::Ok().json(distribution),
            None => HttpResponse::NotFound().json(error_body("No teams generated yet")),
        },
    )
    .await
}

/// Every route of the app; shared by `main` and the tests.
fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index_async))
        .service(api_health)
        .service(favicon)
        .service(api_export_players)
        .service(api_import_players)
        .service(api_list_players)
        .service(api_add_player)
        .service(api_update_player)
        .service(api_remove_player)
        .service(api_register)
        .service(api_list_checkins)
        .service(api_clear_checkins)
        .service(api_check_in_by_name)
        .service(api_check_in)
        .service(api_check_out)
        .service(api_generate_teams)
        .service(api_last_teams);
}

fn open_store(config: &Config) -> std::io::Result<Box<dyn RosterStore>> {
    match &config.data_file {
        Some(path) => {
            let store = JsonFileStore::open(path.clone())
                .map_err(std::io::Error::other)?;
            Ok(Box::new(store))
        }
        None => {
            log::warn!("DATA_FILE disabled: roster is kept in memory only");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = open_store(&config)?;
    let bind = (config.host.clone(), config.port);
    log::info!(
        "Starting server at http://{}:{} (tie-break {}, max {} teams)",
        bind.0,
        bind.1,
        config.tie_break,
        config.max_team_count
    );

    let state = Data::new(AppState { store, config });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
