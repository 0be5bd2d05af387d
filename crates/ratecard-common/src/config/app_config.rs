//! Application configuration structs
//!
//! Loads configuration from environment variables, reading a `.env` file first
//! when one is present.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub ids: IdConfig,
    pub activity: ActivityConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Redis configuration. Without a URL the activity log runs durable-only.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl RedisConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Record id generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Activity log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_display_offset_minutes")]
    pub display_utc_offset_minutes: i32,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_cache_max_attempts")]
    pub cache_max_attempts: u32,
}

impl ActivityConfig {
    /// Offset used when rendering activity timestamps.
    /// Out-of-range values are rejected by [`AppConfig::from_env`]; UTC otherwise.
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        offset_from_minutes(self.display_utc_offset_minutes).unwrap_or_else(|| Utc.fix())
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

// Default value functions
fn default_app_name() -> String {
    "ratecard-admin".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    86_400 // 24 hours
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_display_offset_minutes() -> i32 {
    330 // +05:30
}

fn default_cache_capacity() -> usize {
    100
}

fn default_cache_max_attempts() -> u32 {
    3
}

/// Read an optional variable, failing only when it is set but unparsable
fn parsed<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(None),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or a set
    /// variable cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let worker_id: u16 = parsed("WORKER_ID")?.unwrap_or(0);
        if worker_id > 1023 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        let display_utc_offset_minutes: i32 =
            parsed("ACTIVITY_DISPLAY_UTC_OFFSET_MINUTES")?.unwrap_or_else(default_display_offset_minutes);
        if offset_from_minutes(display_utc_offset_minutes).is_none() {
            return Err(ConfigError::InvalidValue(
                "ACTIVITY_DISPLAY_UTC_OFFSET_MINUTES",
                display_utc_offset_minutes.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::from_name(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parsed("API_PORT")?.unwrap_or_else(default_api_port),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                connect_timeout_secs: parsed("DATABASE_CONNECT_TIMEOUT_SECS")?
                    .unwrap_or_else(default_connect_timeout_secs),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
                max_connections: parsed("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
                connect_timeout_secs: parsed("REDIS_CONNECT_TIMEOUT_SECS")?
                    .unwrap_or_else(default_connect_timeout_secs),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: parsed("JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_access_token_expiry),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: parsed("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            ids: IdConfig { worker_id },
            activity: ActivityConfig {
                display_utc_offset_minutes,
                cache_capacity: parsed("ACTIVITY_CACHE_CAPACITY")?
                    .unwrap_or_else(default_cache_capacity)
                    .max(1),
                cache_max_attempts: parsed("ACTIVITY_CACHE_MAX_ATTEMPTS")?
                    .unwrap_or_else(default_cache_max_attempts)
                    .max(1),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
