//! Health service
//!
//! Readiness checks for the database and the recent-activity cache.

use tracing::{instrument, warn};

use crate::dto::{CacheHealth, ReadinessResponse};

use super::context::ServiceContext;

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Database failure means not ready; a missing or failing cache only degrades
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let database_healthy = match self.ctx.port_repo().count().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness check failed");
                false
            }
        };

        let cache = match self.ctx.activity_feed() {
            None => CacheHealth::Disabled,
            Some(feed) => match feed.ping().await {
                Ok(()) => CacheHealth::Healthy,
                Err(e) => {
                    warn!(error = %e, "Cache readiness check failed");
                    CacheHealth::Unhealthy
                }
            },
        };

        ReadinessResponse::evaluate(database_healthy, cache)
    }
}
