//! PostgreSQL implementation of PortRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ratecard_core::entities::Port;
use ratecard_core::error::DomainError;
use ratecard_core::traits::{PortRepository, RepoResult};
use ratecard_core::value_objects::RecordId;

use crate::models::PortModel;

use super::error::{like_pattern, map_db_error, map_still_referenced, map_unique_violation};

/// PostgreSQL implementation of PortRepository
#[derive(Clone)]
pub struct PgPortRepository {
    pool: PgPool,
}

impl PgPortRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortRepository for PgPortRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Port>> {
        let result = sqlx::query_as::<_, PortModel>(
            r"
            SELECT id, port_code, port_name, country, region, created_at, updated_at
            FROM ports
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Port::from))
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Port>> {
        let result = sqlx::query_as::<_, PortModel>(
            r"
            SELECT id, port_code, port_name, country, region, created_at, updated_at
            FROM ports
            WHERE port_code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Port::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<Port>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let result = sqlx::query_as::<_, PortModel>(
            r"
            SELECT id, port_code, port_name, country, region, created_at, updated_at
            FROM ports
            WHERE id = ANY($1)
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Port::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Port>> {
        let result = sqlx::query_as::<_, PortModel>(
            r"
            SELECT id, port_code, port_name, country, region, created_at, updated_at
            FROM ports
            ORDER BY port_name, port_code
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Port::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Port>> {
        let result = sqlx::query_as::<_, PortModel>(
            r"
            SELECT id, port_code, port_name, country, region, created_at, updated_at
            FROM ports
            WHERE port_name ILIKE $1 OR port_code ILIKE $1 OR country ILIKE $1
            ORDER BY port_name, port_code
            LIMIT $2
            ",
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Port::from).collect())
    }

    #[instrument(skip(self, port), fields(port_code = %port.port_code))]
    async fn create(&self, port: &Port) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO ports (id, port_code, port_name, country, region, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(port.id.into_inner())
        .bind(&port.port_code)
        .bind(&port.port_name)
        .bind(&port.country)
        .bind(&port.region)
        .bind(port.created_at)
        .bind(port.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PortCodeExists(port.port_code.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, port), fields(port_id = %port.id))]
    async fn update(&self, port: &Port) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE ports
            SET port_name = $2, country = $3, region = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(port.id.into_inner())
        .bind(&port.port_name)
        .bind(&port.country)
        .bind(&port.region)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PortNotFound(port.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM ports WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_still_referenced(e, "Port"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PortNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ports")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
