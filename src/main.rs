mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{config::Config, services::RedisService};

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");
    let config_state = config.clone();

    // Initialize Redis client
    let redis_client =
        Arc::new(redis::Client::open(config.redis.url).expect("Failed to connect to Redis"));
    let redis_service = RedisService::new(redis_client);

    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    // Create router with all routes
    let app = Router::new()
        // Public pages
        .route("/", get(handlers::serve_home_page))
        .route(
            "/signin",
            get(handlers::serve_signin_page).post(handlers::handle_signin),
        )
        .route(
            "/register",
            get(handlers::serve_register_page).post(handlers::handle_register),
        )
        .route("/logout", get(handlers::handle_logout))
        // Profile and plan lifecycle
        .route("/profile", get(handlers::serve_profile))
        .route(
            "/profile/create",
            get(handlers::serve_kind_page).post(handlers::choose_kind),
        )
        .route(
            "/profile/create/count",
            get(handlers::serve_count_page).post(handlers::submit_count),
        )
        .route(
            "/profile/create/items",
            get(handlers::serve_item_page).post(handlers::submit_item),
        )
        .route("/done", get(handlers::mark_item_done))
        .route("/delete", get(handlers::delete_plan))
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)
        // Add state
        .with_state((redis_service, config_state));

    tracing::info!(
        "Server running on {}:{}",
        config.server.host,
        config.server.port
    );
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
            .await
            .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
