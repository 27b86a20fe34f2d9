//! Litoral Campaign Gallery Backend
//!
//! REST backend for a hotel's promotional campaign gallery: public browsing,
//! authenticated admin CRUD, SQLite persistence.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod query;
mod session;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::Authenticator;
use config::Config;
use db::Repository;
use models::CreateUserRequest;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub auth: Arc<Authenticator>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Litoral Campaign Gallery Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Session path: {:?}", config.session_path);
    tracing::info!("Uploads dir: {:?}", config.uploads_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Session store and authenticator
    let sessions = SessionStore::new(config.session_path.clone());
    let authenticator = Arc::new(Authenticator::new((*repo).clone(), sessions));

    // Seed the first admin profile from the environment, or warn
    if repo.count_users().await? == 0 {
        match (&config.admin_email, &config.admin_password) {
            (Some(email), Some(password)) => {
                repo.create_user(&CreateUserRequest {
                    email: email.clone(),
                    name: "Administrador".to_string(),
                    role: "admin".to_string(),
                    password: password.clone(),
                })
                .await?;
                tracing::info!("Seeded admin profile for {}", email);
            }
            _ => {
                tracing::warn!(
                    "No admin profiles exist and no seed credentials configured \
                     (LITORAL_ADMIN_EMAIL / LITORAL_ADMIN_PASSWORD). Login is impossible!"
                );
            }
        }
    }

    // Create application state
    let state = AppState {
        repo,
        auth: authenticator,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the session store for the auth layer
    let sessions = state.auth.sessions().clone();

    // Admin routes behind the session middleware
    let admin_routes = Router::new()
        // Auth
        .route("/auth/logout", post(api::logout))
        .route("/auth/session", get(api::current_session))
        // Campaigns
        .route("/campaigns", get(api::list_campaigns))
        .route("/campaigns", post(api::create_campaign))
        .route("/campaigns/{id}", get(api::get_campaign))
        .route("/campaigns/{id}", put(api::update_campaign))
        .route("/campaigns/{id}", delete(api::delete_campaign))
        // Categories
        .route("/categories", post(api::create_category))
        .route("/categories/{id}", put(api::update_category))
        .route("/categories/{id}", delete(api::delete_category))
        .route("/categories/{id}/move", post(api::move_category))
        // Users
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        // Uploads
        .route(
            "/uploads",
            post(api::upload_image).layer(middleware::from_fn(api::envelope_oversize_upload)),
        )
        .layer(DefaultBodyLimit::max(api::MAX_UPLOAD_BYTES + 1024))
        // Apply session auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::session_auth_layer(sessions.clone(), req, next)
        }));

    // Public routes: login and the gallery
    let public_routes = Router::new()
        .route("/auth/login", post(api::login))
        .route("/gallery", get(api::gallery))
        .route("/categories", get(api::list_categories));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
