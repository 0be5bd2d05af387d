//! # ratecard-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, AccessToken, Claims, JwtService,
    MIN_PASSWORD_LENGTH,
};
pub use config::{
    ActivityConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    IdConfig, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
