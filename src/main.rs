use feednest_backend::infrastructure::config::{Config, LogFormat};
use feednest_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use feednest_backend::infrastructure::http::start_http_server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting feednest backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    // Apply pending migrations
    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    let user_repo = Arc::new(feednest_backend::infrastructure::repositories::UserRepository::new(pool.clone()));
    let token_repo = Arc::new(feednest_backend::infrastructure::repositories::AuthTokenRepository::new(pool.clone()));
    let feed_repo = Arc::new(feednest_backend::infrastructure::repositories::FeedRepository::new(pool.clone()));
    let entry_repo = Arc::new(feednest_backend::infrastructure::repositories::EntryRepository::new(pool.clone()));

    // 2. Instantiate the ingestion pipeline (HTTP fetcher + resolver)
    let fetcher = Arc::new(feednest_backend::domain::ingest::HttpFetcher::new()?);
    let resolver = Arc::new(feednest_backend::domain::ingest::FeedResolver::new(
        fetcher.clone(),
        feed_repo.clone(),
    ));

    // 3. Instantiate services (inject repositories and collaborators)
    let user_service = Arc::new(feednest_backend::domain::user::UserService::new(
        user_repo.clone(),
    ));
    let auth_service = Arc::new(feednest_backend::domain::auth::AuthService::new(
        user_repo.clone(),
        token_repo.clone(),
        config.token_expiration_hours,
        config.refresh_token_expiration_days,
    ));
    let feed_service = Arc::new(feednest_backend::domain::feed::FeedService::new(
        feed_repo.clone(),
        resolver,
    ));
    let entry_service = Arc::new(feednest_backend::domain::entry::EntryService::new(
        entry_repo.clone(),
    ));

    // 4. Instantiate controllers (inject services)
    let user_controller = Arc::new(feednest_backend::controllers::UserController::new(
        user_service,
        auth_service,
    ));
    let feed_controller = Arc::new(feednest_backend::controllers::FeedController::new(feed_service));
    let entry_controller = Arc::new(feednest_backend::controllers::EntryController::new(entry_service));

    // Start HTTP server with all routes
    start_http_server(
        pool,
        config,
        token_repo,
        user_repo,
        user_controller,
        feed_controller,
        entry_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "feednest_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "feednest_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
