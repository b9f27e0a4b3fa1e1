use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::services::{BoardService, TeamService, UserService};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{boards, health, tasks, teams, users};
use crate::services::{SqlBoardService, SqlTeamService, SqlUserService};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub users: Arc<dyn UserService>,
    pub teams: Arc<dyn TeamService>,
    pub boards: Arc<dyn BoardService>,
}

impl AppState {
    /// Wires the SQLite-backed services onto a shared pool.
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let export_dir = config.export.output_dir.clone();
        Self {
            users: Arc::new(SqlUserService::new(pool.clone())),
            teams: Arc::new(SqlTeamService::new(pool.clone())),
            boards: Arc::new(SqlBoardService::new(pool.clone(), export_dir)),
            config: Arc::new(config),
            pool,
        }
    }
}

pub fn create_app(config: Config, pool: SqlitePool) -> Router {
    let state = AppState::new(config, pool);
    let config = state.config.clone();

    // Empty origin list allows any origin
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let user_routes = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:user_id",
            get(users::get_user).put(users::update_user),
        )
        .route("/users/:user_id/teams", get(users::get_user_teams));

    let team_routes = Router::new()
        .route("/teams", post(teams::create_team).get(teams::list_teams))
        .route(
            "/teams/:team_id",
            get(teams::get_team).put(teams::update_team),
        )
        .route(
            "/teams/:team_id/users",
            post(teams::add_users)
                .delete(teams::remove_users)
                .get(teams::list_team_users),
        );

    let board_routes = Router::new()
        .route(
            "/teams/:team_id/boards",
            post(boards::create_board).get(boards::list_open_boards),
        )
        .route("/boards/:board_id/close", put(boards::close_board))
        .route("/boards/:board_id/export", post(boards::export_board))
        .route("/boards/:board_id/tasks", post(tasks::add_task))
        .route("/tasks/:task_id/status", put(tasks::update_task_status));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(team_routes)
        .merge(board_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
