//! Redis connection pool using deadpool-redis.
//!
//! Provides a managed pool of Redis connections with bounded wait and connect
//! times, so an unreachable server fails fast instead of stalling requests.

use std::time::Duration;

use deadpool_redis::{Config, Pool, PoolError, Runtime};
use ratecard_core::DomainError;

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: usize,
    /// Upper bound for waiting on and establishing a connection
    pub connect_timeout: Duration,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisPoolConfig {
    /// Build from application config. `None` when no Redis URL is configured.
    pub fn from_app_config(config: &ratecard_common::RedisConfig) -> Option<Self> {
        config.url.as_ref().map(|url| Self {
            url: url.clone(),
            max_connections: config.max_connections as usize,
            connect_timeout: config.connect_timeout(),
        })
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RedisPoolError {
    /// Whether the failure means Redis could not be reached at all
    pub fn is_connection(&self) -> bool {
        match self {
            Self::GetConnection(_) => true,
            Self::Redis(e) => {
                e.is_io_error() || e.is_connection_refusal() || e.is_timeout() || e.is_connection_dropped()
            }
            Self::CreatePool(_) | Self::Serialization(_) => false,
        }
    }
}

impl From<RedisPoolError> for DomainError {
    fn from(e: RedisPoolError) -> Self {
        if e.is_connection() {
            DomainError::CacheUnavailable(e.to_string())
        } else {
            DomainError::CacheError(e.to_string())
        }
    }
}

/// Result type for Redis pool operations
pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    /// Create a new Redis pool. No connection is opened until first use.
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .wait_timeout(Some(config.connect_timeout))
            .create_timeout(Some(config.connect_timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        // Redact credentials from URL for logging
        let safe_url = config.url.split('@').next_back().unwrap_or(&config.url);
        tracing::info!(
            url = %safe_url,
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    /// Get a connection from the pool
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(RedisPoolError::GetConnection)
    }

    /// Check if the pool is healthy by pinging Redis
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
