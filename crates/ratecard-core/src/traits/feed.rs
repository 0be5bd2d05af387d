//! Recent-activity feed - a bounded, newest-first cache of activities

use async_trait::async_trait;

use crate::entities::Activity;
use crate::traits::RepoResult;

#[async_trait]
pub trait ActivityFeed: Send + Sync {
    /// Push onto the head of the feed, trimming it to capacity
    async fn push(&self, activity: &Activity) -> RepoResult<()>;

    /// Up to `limit` activities, newest first.
    /// Entries that no longer deserialize are dropped.
    async fn recent(&self, limit: usize) -> RepoResult<Vec<Activity>>;

    /// Connectivity check used by readiness
    async fn ping(&self) -> RepoResult<()>;
}
