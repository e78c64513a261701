use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{health, EntryController, FeedController, UserController},
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

use crate::infrastructure::repositories::{AuthTokenRepository, UserRepository};

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    token_repo: Arc<AuthTokenRepository>,
    user_repo: Arc<UserRepository>,
    user_controller: Arc<UserController>,
    feed_controller: Arc<FeedController>,
    entry_controller: Arc<EntryController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth_state = (token_repo, user_repo);

    // User routes (public - account creation and token endpoints)
    let user_routes = Router::new()
        .route("/api/users", post(UserController::register))
        .route("/api/users/login", post(UserController::login))
        .route("/api/users/refresh", post(UserController::refresh))
        .with_state(user_controller.clone());

    // Feed routes (require authentication)
    let feed_routes = Router::new()
        .route(
            "/api/feeds",
            get(FeedController::list_feeds).post(FeedController::subscribe),
        )
        .route(
            "/api/feeds/:feedId",
            axum::routing::delete(FeedController::unsubscribe),
        )
        .with_state(feed_controller.clone())
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    // Entry routes (require authentication)
    let entry_routes = Router::new()
        .route("/api/entries", get(EntryController::list_unread))
        .route("/api/entries/read_all", post(EntryController::read_all))
        .route("/api/entries/:id/read", post(EntryController::mark_read))
        .route("/api/entries/:id/unread", post(EntryController::mark_unread))
        .with_state(entry_controller.clone())
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    // Build application routes
    let app = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/health/ready", get(health::health_ready))
        .with_state(pool.clone())
        .merge(user_routes)
        .merge(feed_routes)
        .merge(entry_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
