//! folio-api - personal portfolio/blog backend.
//! The binary delegates here; tests drive the same router in-process.

pub mod api;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod validate;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::auth::{require_auth, require_guest};

/// CORS from the configured origins; falls back to permissive when no
/// origin parses (local development).
fn configure_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Assemble the application router: public routes, the guest-guarded
/// login page, the OAuth endpoints, and the session-guarded dashboard.
pub fn create_app() -> Router {
    Router::new()
        .merge(public_routes())
        .merge(auth_routes())
        .merge(dashboard_routes())
        // Global middleware
        .layer(from_fn(middleware::log::log_request))
        .layer(middleware::log::propagate_request_id_layer())
        .layer(middleware::log::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors())
}

fn public_routes() -> Router {
    use handlers::public::{health, home, posts};

    Router::new()
        .route("/", get(home::home))
        .route("/posts/:id", get(posts::detail))
        .route("/health", get(health::health))
}

fn auth_routes() -> Router {
    use handlers::public::auth;

    // Only the login page itself is guest-only; the provider redirect and
    // callback must stay reachable mid-flow.
    let login_page = Router::new()
        .route("/auth", get(auth::login_page))
        .route_layer(from_fn(require_guest));

    Router::new()
        .merge(login_page)
        .route("/auth/github", get(auth::github_begin))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/auth/logout", post(auth::logout))
}

fn dashboard_routes() -> Router {
    use handlers::dashboard::{experiences, posts, profile, projects};

    Router::new()
        .route("/dashboard", get(profile::view))
        .route("/dashboard/bio", post(profile::upsert_bio))
        .route("/dashboard/social", post(profile::upsert_social))
        .route("/dashboard/social/delete", post(profile::delete_social))
        .route(
            "/dashboard/posts",
            get(posts::list).post(posts::upsert),
        )
        .route("/dashboard/posts/delete", post(posts::delete))
        .route(
            "/dashboard/projects",
            get(projects::list).post(projects::upsert),
        )
        .route("/dashboard/projects/delete", post(projects::delete))
        .route(
            "/dashboard/experiences",
            get(experiences::list).post(experiences::upsert),
        )
        .route("/dashboard/experiences/delete", post(experiences::delete))
        .route_layer(from_fn(require_auth))
}

/// Run the server (used by main)
pub async fn run() {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting folio-api in {:?} mode", config.environment);

    // Bootstrap the schema when a database is reachable; the server still
    // starts without one so /health can report the degraded state.
    match database::DatabaseManager::pool().await {
        Ok(pool) => {
            if let Err(e) = database::migrate::run(&pool).await {
                tracing::error!("Failed to run database migrations: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Database unavailable at startup: {}. Continuing.", e);
        }
    }

    let app = create_app();

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("folio-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
