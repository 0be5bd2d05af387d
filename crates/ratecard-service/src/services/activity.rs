//! Activity log service
//!
//! Every admin action is written to the durable store first, then pushed onto
//! the recent-activity feed. Feed failures degrade to durable-only and never
//! fail the caller.

use std::time::Duration;

use ratecard_core::traits::{ActivityFeed, ActivityQuery};
use ratecard_core::{parse_bound, Activity, ActivityActor, ActivityType, BoundEdge};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::dto::{ActivityResponse, HistoricalActivityQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Upper bound for both recent and historical page sizes
pub const MAX_ACTIVITY_PAGE: usize = 100;
pub const DEFAULT_RECENT_LIMIT: usize = 20;
pub const DEFAULT_HISTORICAL_LIMIT: i64 = 50;

const RETRY_BACKOFF_MS: u64 = 25;

/// Activity log service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Write one activity. Fails only if the durable write fails.
    #[instrument(skip(self, data, actor), fields(activity_type = %activity_type))]
    pub async fn log(
        &self,
        activity_type: ActivityType,
        data: Value,
        actor: Option<&ActivityActor>,
    ) -> ServiceResult<Activity> {
        let activity = Activity::new(self.ctx.generate_id(), activity_type, data, actor.cloned());

        self.ctx.activity_repo().create(&activity).await?;

        if let Some(feed) = self.ctx.activity_feed() {
            self.push_to_feed(feed, &activity).await;
        }

        debug!(activity_id = %activity.id, "Activity logged");
        Ok(activity)
    }

    /// Log after a successful mutation; auditing never fails the caller
    pub async fn record(
        &self,
        activity_type: ActivityType,
        data: Value,
        actor: Option<&ActivityActor>,
    ) {
        if let Err(e) = self.log(activity_type, data, actor).await {
            warn!(activity_type = %activity_type, error = %e, "Failed to record activity");
        }
    }

    async fn push_to_feed(&self, feed: &dyn ActivityFeed, activity: &Activity) {
        let max_attempts = self.ctx.activity_settings().cache_max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match feed.push(activity).await {
                Ok(()) => return,
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    debug!(activity_id = %activity.id, attempt, error = %e, "Retrying activity feed push");
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt)))
                        .await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(
                        activity_id = %activity.id,
                        attempts = attempt,
                        error = %e,
                        "Activity feed push failed, durable copy kept"
                    );
                    return;
                }
            }
        }
    }

    /// Newest activities, preferring the feed and falling back to the durable store
    #[instrument(skip(self))]
    pub async fn get_recent(&self, limit: usize) -> ServiceResult<Vec<ActivityResponse>> {
        let limit = limit.clamp(1, MAX_ACTIVITY_PAGE);

        if let Some(feed) = self.ctx.activity_feed() {
            match feed.recent(limit).await {
                Ok(cached) if !cached.is_empty() => return Ok(self.render(&cached)),
                Ok(_) => debug!("Activity feed empty, reading durable store"),
                Err(e) => warn!(error = %e, "Activity feed read failed, reading durable store"),
            }
        }

        let durable = self
            .ctx
            .activity_repo()
            .find(ActivityQuery {
                skip: 0,
                limit: limit as i64,
                ..ActivityQuery::default()
            })
            .await?;
        Ok(self.render(&durable))
    }

    /// Paginated durable query over an inclusive time range, newest first
    #[instrument(skip(self))]
    pub async fn get_historical(
        &self,
        query: HistoricalActivityQuery,
    ) -> ServiceResult<Vec<ActivityResponse>> {
        let start = non_blank(query.start_date.as_deref())
            .map(|raw| parse_bound(raw, "start_date", BoundEdge::Start))
            .transpose()?;
        let end = non_blank(query.end_date.as_deref())
            .map(|raw| parse_bound(raw, "end_date", BoundEdge::End))
            .transpose()?;

        let activities = self
            .ctx
            .activity_repo()
            .find(ActivityQuery {
                skip: query.skip.unwrap_or(0).max(0),
                limit: query
                    .limit
                    .unwrap_or(DEFAULT_HISTORICAL_LIMIT)
                    .clamp(1, MAX_ACTIVITY_PAGE as i64),
                start,
                end,
            })
            .await?;
        Ok(self.render(&activities))
    }

    fn render(&self, activities: &[Activity]) -> Vec<ActivityResponse> {
        let offset = self.ctx.activity_settings().display_offset;
        activities
            .iter()
            .map(|activity| ActivityResponse::render(activity, offset))
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
