//! Redis list holding the most recent admin activities, newest at the head.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use ratecard_core::entities::Activity;
use ratecard_core::traits::{ActivityFeed, RepoResult};

use crate::pool::{RedisPool, RedisResult};

/// Redis key of the activity list
pub const ACTIVITY_FEED_KEY: &str = "admin_activities";

/// Entries kept after each push
pub const DEFAULT_FEED_CAPACITY: usize = 100;

/// [`ActivityFeed`] over a Redis list trimmed to a fixed capacity
#[derive(Debug, Clone)]
pub struct RedisActivityFeed {
    pool: RedisPool,
    key: String,
    capacity: usize,
}

impl RedisActivityFeed {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_capacity(pool, DEFAULT_FEED_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(pool: RedisPool, capacity: usize) -> Self {
        Self {
            pool,
            key: ACTIVITY_FEED_KEY.to_string(),
            capacity: capacity.max(1),
        }
    }

    /// Use a different list key, e.g. to isolate test runs
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// LPUSH and LTRIM in one MULTI/EXEC so readers never see an untrimmed list
    async fn push_raw(&self, activity: &Activity) -> RedisResult<()> {
        let payload = serde_json::to_string(activity)?;
        let mut conn = self.pool.get().await?;

        redis::pipe()
            .atomic()
            .lpush(&self.key, payload)
            .ignore()
            .ltrim(&self.key, 0, last_index(self.capacity))
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        debug!(activity_id = %activity.id, key = %self.key, "Pushed activity to feed");
        Ok(())
    }

    async fn recent_raw(&self, limit: usize) -> RedisResult<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;
        let entries: Vec<String> = conn.lrange(&self.key, 0, last_index(limit)).await?;
        Ok(entries)
    }
}

fn last_index(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX) - 1
}

/// Deserialize feed entries, dropping those that no longer parse
fn decode_entries(entries: Vec<String>) -> Vec<Activity> {
    entries
        .into_iter()
        .filter_map(|raw| match serde_json::from_str::<Activity>(&raw) {
            Ok(activity) => Some(activity),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable activity feed entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ActivityFeed for RedisActivityFeed {
    async fn push(&self, activity: &Activity) -> RepoResult<()> {
        Ok(self.push_raw(activity).await?)
    }

    async fn recent(&self, limit: usize) -> RepoResult<Vec<Activity>> {
        let entries = self.recent_raw(limit).await?;
        Ok(decode_entries(entries))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(self.pool.health_check().await?)
    }
}
