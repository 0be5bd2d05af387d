//! # ratecard-cache
//!
//! Redis layer for the recent-activity feed.
//!
//! ## Example
//!
//! ```ignore
//! use ratecard_cache::{RedisActivityFeed, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! pool.health_check().await?;
//! let feed = RedisActivityFeed::with_capacity(pool, 100);
//! feed.push(&activity).await?;
//! let latest = feed.recent(20).await?;
//! ```

pub mod activity;
pub mod pool;

pub use activity::{RedisActivityFeed, ACTIVITY_FEED_KEY, DEFAULT_FEED_CAPACITY};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
