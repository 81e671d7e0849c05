//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use forum_common::{AppConfig, AppError, JwtService, StorageBackend};
use forum_core::SnowflakeGenerator;
use forum_db::{
    create_pool, run_migrations, InMemoryStore, PgDiscussionRepository, PgLikeRepository,
    PgNotificationRepository, PgReplyRepository, PoolConfig,
};
use forum_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a configuration error if the rate limiter settings are invalid
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let router = apply_rate_limit(create_router(), &config.rate_limit)?.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// # Errors
/// Returns an error if the storage backend cannot be reached or set up
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let builder = match config.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; state is lost on restart");
            ServiceContextBuilder::new().store(InMemoryStore::new())
        }
        StorageBackend::Postgres => postgres_repositories(&config).await?,
    };

    let service_context = builder
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, jwt_service, config))
}

/// Connect to PostgreSQL and wire the Pg repositories
async fn postgres_repositories(config: &AppConfig) -> Result<ServiceContextBuilder, AppError> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".into()))?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(db_config))
        .await
        .map_err(|e| AppError::Unavailable(e.to_string()))?;
    info!("PostgreSQL connection established");

    if db_config.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Config(format!("migrations failed: {e}")))?;
        info!("Database migrations applied");
    }

    Ok(ServiceContextBuilder::new()
        .discussion_repo(Arc::new(PgDiscussionRepository::new(pool.clone())))
        .reply_repo(Arc::new(PgReplyRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool))))
}

/// Run the HTTP server
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
///
/// # Errors
/// Returns an error if startup fails
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
