//! Server setup and initialization
//!
//! Wires PostgreSQL, the optional Redis activity feed and the service
//! context into an Axum application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use ratecard_cache::{RedisActivityFeed, RedisPool, RedisPoolConfig};
use ratecard_common::{AppConfig, AppError, JwtService, RedisConfig};
use ratecard_core::traits::ActivityFeed;
use ratecard_core::IdGenerator;
use ratecard_db::{
    create_pool, run_migrations, DatabaseConfig, PgActivityRepository, PgPortRepository,
    PgRateRepository, PgShippingLineRepository, PgUserRepository,
};
use ratecard_service::{ActivitySettings, ServiceContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a configuration error if the rate limit settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_rate_limit(create_router(), &config.rate_limit)?.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
    info!("PostgreSQL connection established");

    let activity_feed = connect_activity_feed(&config.redis, config.activity.cache_capacity).await;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let id_generator = Arc::new(
        IdGenerator::new(config.ids.worker_id).map_err(|e| AppError::Config(e.to_string()))?,
    );

    let mut builder = ServiceContext::builder()
        .port_repo(Arc::new(PgPortRepository::new(pool.clone())))
        .shipping_line_repo(Arc::new(PgShippingLineRepository::new(pool.clone())))
        .rate_repo(Arc::new(PgRateRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .activity_repo(Arc::new(PgActivityRepository::new(pool)))
        .jwt_service(jwt_service)
        .id_generator(id_generator)
        .activity_settings(ActivitySettings::from(&config.activity));
    if let Some(feed) = activity_feed {
        builder = builder.activity_feed(feed);
    }
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Redis-backed feed, or `None` when Redis is unset or unreachable at startup
async fn connect_activity_feed(
    config: &RedisConfig,
    capacity: usize,
) -> Option<Arc<dyn ActivityFeed>> {
    let Some(pool_config) = RedisPoolConfig::from_app_config(config) else {
        warn!("REDIS_URL not set, activity log runs durable-only");
        return None;
    };

    info!("Connecting to Redis...");
    let pool = match RedisPool::new(pool_config) {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "Redis pool creation failed, activity log runs durable-only");
            return None;
        }
    };
    if let Err(e) = pool.health_check().await {
        warn!(error = %e, "Redis unreachable, activity log runs durable-only");
        return None;
    }

    info!(capacity, "Redis connection established");
    Some(Arc::new(RedisActivityFeed::with_capacity(pool, capacity)))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
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
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
