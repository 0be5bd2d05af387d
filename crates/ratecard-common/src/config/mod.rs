//! Configuration structs

mod app_config;

pub use app_config::{
    ActivityConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    IdConfig, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
