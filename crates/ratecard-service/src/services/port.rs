//! Port service
//!
//! Port reference data: public listing and typeahead search, admin CRUD.

use ratecard_core::{ActivityActor, ActivityType, DomainError, Port, RecordId};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::dto::{CreatePortRequest, PortResponse, SearchHit, UpdatePortRequest};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Search terms shorter than this return nothing
pub const MIN_SEARCH_TERM_LEN: usize = 2;
pub const SEARCH_LIMIT: i64 = 20;

/// Port service
pub struct PortService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PortService<'a> {
    /// Create a new PortService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<PortResponse>> {
        let ports = self.ctx.port_repo().find_all().await?;
        Ok(ports.into_iter().map(PortResponse::from).collect())
    }

    /// Case-insensitive match on name, code or country
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> ServiceResult<Vec<SearchHit>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            return Ok(Vec::new());
        }
        let ports = self.ctx.port_repo().search(term, SEARCH_LIMIT).await?;
        Ok(ports.iter().map(SearchHit::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, port_id: RecordId) -> ServiceResult<PortResponse> {
        self.find_port(port_id).await.map(PortResponse::from)
    }

    #[instrument(skip(self, request, actor), fields(port_code = %request.port_code))]
    pub async fn create(
        &self,
        request: CreatePortRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<PortResponse> {
        let port = Port::new(
            self.ctx.generate_id(),
            &request.port_code,
            &request.port_name,
            &request.country,
            request.region.as_deref(),
        );
        if port.port_code.is_empty() || port.port_name.is_empty() || port.country.is_empty() {
            return Err(DomainError::validation("port_code, port_name and country are required").into());
        }

        if self.ctx.port_repo().find_by_code(&port.port_code).await?.is_some() {
            return Err(DomainError::PortCodeExists(port.port_code).into());
        }
        self.ctx.port_repo().create(&port).await?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::PortCreated,
                json!({
                    "port_id": port.id.to_string(),
                    "port_details": port_details(&port),
                }),
                Some(actor),
            )
            .await;

        info!(port_id = %port.id, "Port created");
        Ok(PortResponse::from(port))
    }

    /// Update name, country or region. The code never changes.
    #[instrument(skip(self, request, actor))]
    pub async fn update(
        &self,
        port_id: RecordId,
        request: UpdatePortRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<PortResponse> {
        let mut port = self.find_port(port_id).await?;
        let original = port_details(&port);

        port.apply_update(
            request.port_name.as_deref(),
            request.country.as_deref(),
            request.region.as_deref(),
        );
        if port.port_name.is_empty() || port.country.is_empty() {
            return Err(DomainError::validation("port_name and country must not be blank").into());
        }
        self.ctx.port_repo().update(&port).await?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::PortUpdated,
                json!({
                    "port_id": port_id.to_string(),
                    "original": original,
                    "updates": serde_json::to_value(&request).unwrap_or(Value::Null),
                }),
                Some(actor),
            )
            .await;

        info!(port_id = %port_id, "Port updated");
        Ok(PortResponse::from(port))
    }

    /// Ports still referenced by rates cannot be deleted
    #[instrument(skip(self, actor))]
    pub async fn delete(&self, port_id: RecordId, actor: &ActivityActor) -> ServiceResult<()> {
        let port = self.find_port(port_id).await?;
        self.ctx.port_repo().delete(port_id).await?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::PortDeleted,
                json!({
                    "port_id": port_id.to_string(),
                    "port_details": port_details(&port),
                }),
                Some(actor),
            )
            .await;

        info!(port_id = %port_id, "Port deleted");
        Ok(())
    }

    async fn find_port(&self, port_id: RecordId) -> ServiceResult<Port> {
        self.ctx
            .port_repo()
            .find_by_id(port_id)
            .await?
            .ok_or_else(|| DomainError::PortNotFound(port_id).into())
    }
}

fn port_details(port: &Port) -> Value {
    json!({
        "port_code": port.port_code,
        "port_name": port.port_name,
        "country": port.country,
        "region": port.region,
    })
}
