//! PostgreSQL implementation of ShippingLineRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ratecard_core::entities::ShippingLine;
use ratecard_core::error::DomainError;
use ratecard_core::traits::{RepoResult, ShippingLineRepository};
use ratecard_core::value_objects::RecordId;

use crate::models::ShippingLineModel;

use super::error::{like_pattern, map_db_error, map_still_referenced, map_unique_violation};

/// PostgreSQL implementation of ShippingLineRepository
#[derive(Clone)]
pub struct PgShippingLineRepository {
    pool: PgPool,
}

impl PgShippingLineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShippingLineRepository for PgShippingLineRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ShippingLine>> {
        let result = sqlx::query_as::<_, ShippingLineModel>(
            r"
            SELECT id, name, contact_email, website, created_at, updated_at
            FROM shipping_lines
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ShippingLine::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ShippingLine>> {
        let result = sqlx::query_as::<_, ShippingLineModel>(
            r"
            SELECT id, name, contact_email, website, created_at, updated_at
            FROM shipping_lines
            WHERE LOWER(name) = LOWER($1)
            ",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ShippingLine::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<ShippingLine>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let result = sqlx::query_as::<_, ShippingLineModel>(
            r"
            SELECT id, name, contact_email, website, created_at, updated_at
            FROM shipping_lines
            WHERE id = ANY($1)
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(ShippingLine::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<ShippingLine>> {
        let result = sqlx::query_as::<_, ShippingLineModel>(
            r"
            SELECT id, name, contact_email, website, created_at, updated_at
            FROM shipping_lines
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(ShippingLine::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<ShippingLine>> {
        let result = sqlx::query_as::<_, ShippingLineModel>(
            r"
            SELECT id, name, contact_email, website, created_at, updated_at
            FROM shipping_lines
            WHERE name ILIKE $1 OR contact_email ILIKE $1
            ORDER BY name
            LIMIT $2
            ",
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(ShippingLine::from).collect())
    }

    #[instrument(skip(self, line), fields(name = %line.name))]
    async fn create(&self, line: &ShippingLine) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO shipping_lines (id, name, contact_email, website, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(line.id.into_inner())
        .bind(&line.name)
        .bind(&line.contact_email)
        .bind(&line.website)
        .bind(line.created_at)
        .bind(line.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ShippingLineExists(line.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, line), fields(shipping_line_id = %line.id))]
    async fn update(&self, line: &ShippingLine) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE shipping_lines
            SET name = $2, contact_email = $3, website = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(line.id.into_inner())
        .bind(&line.name)
        .bind(&line.contact_email)
        .bind(&line.website)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ShippingLineExists(line.name.clone())))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ShippingLineNotFound(line.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM shipping_lines WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_still_referenced(e, "Shipping line"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ShippingLineNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shipping_lines")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
