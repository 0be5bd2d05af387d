//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use ratecard_core::entities::Activity;
use ratecard_core::traits::{ActivityQuery, ActivityRepository, RepoResult};

use crate::models::ActivityModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self, activity), fields(activity_id = %activity.id, activity_type = %activity.activity_type))]
    async fn create(&self, activity: &Activity) -> RepoResult<()> {
        let user = activity.user.as_ref();

        sqlx::query(
            r"
            INSERT INTO admin_activities (id, activity_type, data, user_id, user_name, user_email, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(activity.id.into_inner())
        .bind(activity.activity_type.as_str())
        .bind(Json(&activity.data))
        .bind(user.map(|u| u.id.into_inner()))
        .bind(user.map(|u| u.name.as_str()))
        .bind(user.map(|u| u.email.as_str()))
        .bind(activity.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ActivityQuery) -> RepoResult<Vec<Activity>> {
        let result = sqlx::query_as::<_, ActivityModel>(
            r"
            SELECT id, activity_type, data, user_id, user_name, user_email, timestamp
            FROM admin_activities
            WHERE ($1::timestamptz IS NULL OR timestamp >= $1)
              AND ($2::timestamptz IS NULL OR timestamp <= $2)
            ORDER BY timestamp DESC, id DESC
            OFFSET $3
            LIMIT $4
            ",
        )
        .bind(query.start)
        .bind(query.end)
        .bind(query.skip)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Activity::from).collect())
    }
}
