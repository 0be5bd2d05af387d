//! Shipping line service

use ratecard_core::{DomainError, RecordId, ShippingLine};
use tracing::{info, instrument};

use crate::dto::{
    CreateShippingLineRequest, SearchHit, ShippingLineResponse, UpdateShippingLineRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::port::{MIN_SEARCH_TERM_LEN, SEARCH_LIMIT};

/// Shipping line service
pub struct ShippingLineService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShippingLineService<'a> {
    /// Create a new ShippingLineService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ShippingLineResponse>> {
        let lines = self.ctx.shipping_line_repo().find_all().await?;
        Ok(lines.into_iter().map(ShippingLineResponse::from).collect())
    }

    /// Case-insensitive match on name or contact email
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> ServiceResult<Vec<SearchHit>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            return Ok(Vec::new());
        }
        let lines = self.ctx.shipping_line_repo().search(term, SEARCH_LIMIT).await?;
        Ok(lines.iter().map(SearchHit::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, line_id: RecordId) -> ServiceResult<ShippingLineResponse> {
        self.find_line(line_id).await.map(ShippingLineResponse::from)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: CreateShippingLineRequest,
    ) -> ServiceResult<ShippingLineResponse> {
        let line = ShippingLine::new(
            self.ctx.generate_id(),
            &request.name,
            &request.contact_email,
            request.website.as_deref(),
        );
        if line.name.is_empty() {
            return Err(DomainError::validation("name is required").into());
        }
        self.ensure_name_free(&line.name, None).await?;

        self.ctx.shipping_line_repo().create(&line).await?;
        info!(shipping_line_id = %line.id, "Shipping line created");
        Ok(ShippingLineResponse::from(line))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        line_id: RecordId,
        request: UpdateShippingLineRequest,
    ) -> ServiceResult<ShippingLineResponse> {
        let mut line = self.find_line(line_id).await?;
        line.apply_update(
            request.name.as_deref(),
            request.contact_email.as_deref(),
            request.website.as_deref(),
        );
        if line.name.is_empty() {
            return Err(DomainError::validation("name must not be blank").into());
        }
        self.ensure_name_free(&line.name, Some(line_id)).await?;

        self.ctx.shipping_line_repo().update(&line).await?;
        info!(shipping_line_id = %line_id, "Shipping line updated");
        Ok(ShippingLineResponse::from(line))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, line_id: RecordId) -> ServiceResult<()> {
        self.ctx.shipping_line_repo().delete(line_id).await?;
        info!(shipping_line_id = %line_id, "Shipping line deleted");
        Ok(())
    }

    async fn find_line(&self, line_id: RecordId) -> ServiceResult<ShippingLine> {
        self.ctx
            .shipping_line_repo()
            .find_by_id(line_id)
            .await?
            .ok_or_else(|| DomainError::ShippingLineNotFound(line_id).into())
    }

    async fn ensure_name_free(&self, name: &str, owner: Option<RecordId>) -> ServiceResult<()> {
        match self.ctx.shipping_line_repo().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(DomainError::ShippingLineExists(existing.name).into())
            }
            _ => Ok(()),
        }
    }
}
