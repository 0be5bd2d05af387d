//! PostgreSQL implementation of RateRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use ratecard_core::entities::{Rate, RateHistory, RateNote};
use ratecard_core::error::DomainError;
use ratecard_core::traits::{LaneQuery, RateRepository, RepoResult};
use ratecard_core::value_objects::{RateValidity, RecordId};

use crate::models::{RateHistoryModel, RateModel, RateNoteModel};

use super::error::map_db_error;

/// PostgreSQL implementation of RateRepository
#[derive(Clone)]
pub struct PgRateRepository {
    pool: PgPool,
}

impl PgRateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `(not_expired_at, valid_at)` bounds bound into the lane query
fn validity_bounds(validity: RateValidity) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    match validity {
        RateValidity::Any => (None, None),
        RateValidity::NotExpiredAt(at) => (Some(at), None),
        RateValidity::ValidAt(at) => (Some(at), Some(at)),
    }
}

#[async_trait]
impl RateRepository for PgRateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Rate>> {
        let result = sqlx::query_as::<_, RateModel>(
            r"
            SELECT id, shipping_line_id, pol_id, pod_id, valid_from, valid_to,
                   container_rates, created_at, updated_at
            FROM rates
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Rate::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Rate>> {
        let result = sqlx::query_as::<_, RateModel>(
            r"
            SELECT id, shipping_line_id, pol_id, pod_id, valid_from, valid_to,
                   container_rates, created_at, updated_at
            FROM rates
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Rate::from).collect())
    }

    #[instrument(skip(self), fields(pol_id = %query.pol_id, pod_id = %query.pod_id))]
    async fn find_by_lane(&self, query: LaneQuery) -> RepoResult<Vec<Rate>> {
        let (not_expired_at, valid_at) = validity_bounds(query.validity);

        let result = sqlx::query_as::<_, RateModel>(
            r"
            SELECT id, shipping_line_id, pol_id, pod_id, valid_from, valid_to,
                   container_rates, created_at, updated_at
            FROM rates
            WHERE pol_id = $1
              AND pod_id = $2
              AND ($3::timestamptz IS NULL OR valid_to >= $3)
              AND ($4::timestamptz IS NULL OR valid_from <= $4)
            ORDER BY created_at, id
            ",
        )
        .bind(query.pol_id.into_inner())
        .bind(query.pod_id.into_inner())
        .bind(not_expired_at)
        .bind(valid_at)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Rate::from).collect())
    }

    #[instrument(skip(self, rate), fields(rate_id = %rate.id))]
    async fn create(&self, rate: &Rate) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO rates (id, shipping_line_id, pol_id, pod_id, valid_from, valid_to,
                               container_rates, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(rate.id.into_inner())
        .bind(rate.shipping_line_id.into_inner())
        .bind(rate.pol_id.into_inner())
        .bind(rate.pod_id.into_inner())
        .bind(rate.validity.valid_from)
        .bind(rate.validity.valid_to)
        .bind(Json(&rate.container_rates))
        .bind(rate.created_at)
        .bind(rate.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, rate), fields(rate_id = %rate.id))]
    async fn update(&self, rate: &Rate) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE rates
            SET shipping_line_id = $2, pol_id = $3, pod_id = $4, valid_from = $5,
                valid_to = $6, container_rates = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(rate.id.into_inner())
        .bind(rate.shipping_line_id.into_inner())
        .bind(rate.pol_id.into_inner())
        .bind(rate.pod_id.into_inner())
        .bind(rate.validity.valid_from)
        .bind(rate.validity.valid_to)
        .bind(Json(&rate.container_rates))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RateNotFound(rate.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM rates WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RateNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rates")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, history), fields(rate_id = %history.rate_id))]
    async fn append_history(&self, history: &RateHistory) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO rate_history (id, rate_id, shipping_line_id, pol_id, pod_id,
                                      valid_from, valid_to, container_rates, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(history.id.into_inner())
        .bind(history.rate_id.into_inner())
        .bind(history.shipping_line_id.into_inner())
        .bind(history.pol_id.into_inner())
        .bind(history.pod_id.into_inner())
        .bind(history.validity.valid_from)
        .bind(history.validity.valid_to)
        .bind(Json(&history.container_rates))
        .bind(history.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_history(&self, rate_id: RecordId) -> RepoResult<Vec<RateHistory>> {
        let result = sqlx::query_as::<_, RateHistoryModel>(
            r"
            SELECT id, rate_id, shipping_line_id, pol_id, pod_id, valid_from, valid_to,
                   container_rates, created_at
            FROM rate_history
            WHERE rate_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(rate_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(RateHistory::from).collect())
    }

    #[instrument(skip(self, note), fields(rate_id = %note.rate_id))]
    async fn create_note(&self, note: &RateNote) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO rate_notes (id, rate_id, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(note.id.into_inner())
        .bind(note.rate_id.into_inner())
        .bind(&note.description)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_notes(&self, rate_id: RecordId) -> RepoResult<Vec<RateNote>> {
        self.find_notes_for_rates(&[rate_id]).await
    }

    #[instrument(skip(self, rate_ids), fields(count = rate_ids.len()))]
    async fn find_notes_for_rates(&self, rate_ids: &[RecordId]) -> RepoResult<Vec<RateNote>> {
        if rate_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rate_ids.iter().map(|id| id.into_inner()).collect();

        let result = sqlx::query_as::<_, RateNoteModel>(
            r"
            SELECT id, rate_id, description, created_at, updated_at
            FROM rate_notes
            WHERE rate_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(RateNote::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_notes(&self, rate_id: RecordId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM rate_notes WHERE rate_id = $1")
            .bind(rate_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
