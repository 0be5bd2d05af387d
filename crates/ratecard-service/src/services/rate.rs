//! Rate service
//!
//! Rate card maintenance: create (single lane or lane matrix), partial update
//! with an audit snapshot, delete with note cleanup, history, and notes.

use chrono::Utc;
use ratecard_core::{
    parse_bound, validate_lines, ActivityActor, ActivityType, BoundEdge, DomainError, Port, Rate,
    RateNote, RecordId, StoredRateLine, ValidityWindow,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::dto::{
    AddNoteRequest, CreateRatesRequest, CreateRatesResponse, NoteResponse, RateHistoryResponse,
    RateRow, UpdateRateRequest,
};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::rate_search::{assemble_rows, note_responses, RowView};

/// Rate service
pub struct RateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RateService<'a> {
    /// Create a new RateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All rates with reference data, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<RateRow>> {
        let rates = self.ctx.rate_repo().find_all().await?;
        assemble_rows(self.ctx, &rates, RowView::Admin).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, rate_id: RecordId) -> ServiceResult<RateRow> {
        let rate = self.find_rate(rate_id).await?;
        let mut rows = assemble_rows(self.ctx, std::slice::from_ref(&rate), RowView::Admin).await?;
        rows.pop()
            .ok_or_else(|| ServiceError::internal("rate row assembly returned nothing"))
    }

    /// Create one rate per origin/destination pair
    #[instrument(skip(self, request, actor), fields(shipping_line = %request.shipping_line))]
    pub async fn create(
        &self,
        request: CreateRatesRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<CreateRatesResponse> {
        let origins = request.origins();
        let destinations = request.destinations();
        if origins.is_empty() {
            return Err(DomainError::validation("at least one origin port (pol or pol_ids) is required").into());
        }
        if destinations.is_empty() {
            return Err(
                DomainError::validation("at least one destination port (pod or pod_ids) is required").into(),
            );
        }

        let validity = ValidityWindow::parse(&request.valid_from, &request.valid_to)?;
        let container_rates = canonical_lines(&request.container_rates)?;

        let line = self
            .ctx
            .shipping_line_repo()
            .find_by_id(request.shipping_line)
            .await?
            .ok_or(DomainError::ShippingLineNotFound(request.shipping_line))?;

        let mut port_ids = origins.clone();
        port_ids.extend(destinations.iter().filter(|id| !origins.contains(*id)));
        let ports = self.ctx.port_repo().find_by_ids(&port_ids).await?;
        for id in &port_ids {
            find_port(&ports, *id)?;
        }

        let notes: Vec<&str> = request
            .notes
            .iter()
            .map(|n| n.description.trim())
            .filter(|d| !d.is_empty())
            .collect();

        let activities = ActivityService::new(self.ctx);
        let mut ids = Vec::with_capacity(origins.len() * destinations.len());

        for pol_id in &origins {
            for pod_id in &destinations {
                let rate = Rate::new(
                    self.ctx.generate_id(),
                    line.id,
                    *pol_id,
                    *pod_id,
                    validity,
                    container_rates.clone(),
                );
                self.ctx
                    .rate_repo()
                    .create(&rate)
                    .await
                    .inspect_err(|e| error!(created = ?ids, failed_pol = %pol_id, failed_pod = %pod_id, error = %e, "Lane matrix partially created"))?;

                self.ctx
                    .rate_repo()
                    .append_history(&rate.snapshot(self.ctx.generate_id()))
                    .await
                    .inspect_err(|e| error!(rate_id = %rate.id, error = %e, "Rate created without its history snapshot"))?;

                for description in &notes {
                    let note = RateNote::new(self.ctx.generate_id(), rate.id, description);
                    self.ctx
                        .rate_repo()
                        .create_note(&note)
                        .await
                        .inspect_err(|e| error!(created = ?ids, failed_pol = %pol_id, failed_pod = %pod_id, error = %e, "Lane matrix partially created"))?;
                }

                let (pol, pod) = (find_port(&ports, *pol_id)?, find_port(&ports, *pod_id)?);
                activities
                    .record(
                        ActivityType::RateCreated,
                        json!({
                            "rate_id": rate.id.to_string(),
                            "rate_details": rate_details(&rate, &line.name, &pol.label(), &pod.label()),
                        }),
                        Some(actor),
                    )
                    .await;

                info!(rate_id = %rate.id, pol = %pol.port_code, pod = %pod.port_code, "Rate created");
                ids.push(rate.id.to_string());
            }
        }

        Ok(CreateRatesResponse::created(ids))
    }

    /// Partial update. The pre-update state is snapshotted first.
    #[instrument(skip(self, request, actor))]
    pub async fn update(
        &self,
        rate_id: RecordId,
        request: UpdateRateRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<RateRow> {
        let original = self.find_rate(rate_id).await?;
        let original_details = self.describe_rate(&original).await?;

        let mut updated = original.clone();
        if let Some(line_id) = request.shipping_line {
            self.ctx
                .shipping_line_repo()
                .find_by_id(line_id)
                .await?
                .ok_or(DomainError::ShippingLineNotFound(line_id))?;
            updated.shipping_line_id = line_id;
        }
        if let Some(pol_id) = request.pol {
            self.require_port(pol_id).await?;
            updated.pol_id = pol_id;
        }
        if let Some(pod_id) = request.pod {
            self.require_port(pod_id).await?;
            updated.pod_id = pod_id;
        }

        let valid_from = match request.valid_from.as_deref() {
            Some(raw) => parse_bound(raw, "valid_from", BoundEdge::Start)?,
            None => original.validity.valid_from,
        };
        let valid_to = match request.valid_to.as_deref() {
            Some(raw) => parse_bound(raw, "valid_to", BoundEdge::End)?,
            None => original.validity.valid_to,
        };
        updated.validity = ValidityWindow::new(valid_from, valid_to)?;

        if let Some(lines) = request.container_rates.as_deref() {
            updated.container_rates = canonical_lines(lines)?;
        }
        updated.updated_at = Utc::now();

        self.ctx
            .rate_repo()
            .append_history(&original.snapshot(self.ctx.generate_id()))
            .await?;
        self.ctx
            .rate_repo()
            .update(&updated)
            .await
            .inspect_err(|e| error!(rate_id = %rate_id, error = %e, "History written but rate update failed"))?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::RateUpdated,
                json!({
                    "rate_id": rate_id.to_string(),
                    "original": original_details,
                    "updates": serde_json::to_value(&request).unwrap_or(Value::Null),
                }),
                Some(actor),
            )
            .await;

        info!(rate_id = %rate_id, "Rate updated");
        self.get(rate_id).await
    }

    /// Delete a rate and all of its notes. History is kept.
    #[instrument(skip(self, actor))]
    pub async fn delete(&self, rate_id: RecordId, actor: &ActivityActor) -> ServiceResult<()> {
        let rate = self.find_rate(rate_id).await?;
        let details = self.describe_rate(&rate).await?;

        let removed = self.ctx.rate_repo().delete_notes(rate_id).await?;
        self.ctx
            .rate_repo()
            .delete(rate_id)
            .await
            .inspect_err(|e| error!(rate_id = %rate_id, error = %e, "Notes removed but rate delete failed"))?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::RateDeleted,
                json!({
                    "rate_id": rate_id.to_string(),
                    "rate_details": details,
                }),
                Some(actor),
            )
            .await;

        info!(rate_id = %rate_id, notes_removed = removed, "Rate deleted");
        Ok(())
    }

    /// Snapshots for a rate, newest first. Survives deletion of the rate.
    #[instrument(skip(self))]
    pub async fn history(&self, rate_id: RecordId) -> ServiceResult<Vec<RateHistoryResponse>> {
        let history = self.ctx.rate_repo().find_history(rate_id).await?;
        if history.is_empty() {
            self.find_rate(rate_id).await?;
        }
        Ok(history.into_iter().map(RateHistoryResponse::from).collect())
    }

    /// Notes for a rate, newest first
    #[instrument(skip(self))]
    pub async fn notes(&self, rate_id: RecordId) -> ServiceResult<Vec<NoteResponse>> {
        self.find_rate(rate_id).await?;
        let notes = self.ctx.rate_repo().find_notes(rate_id).await?;
        Ok(note_responses(&notes))
    }

    #[instrument(skip(self, request))]
    pub async fn add_note(
        &self,
        rate_id: RecordId,
        request: AddNoteRequest,
    ) -> ServiceResult<NoteResponse> {
        if request.description.trim().is_empty() {
            return Err(DomainError::validation("description is required").into());
        }
        self.find_rate(rate_id).await?;

        let note = RateNote::new(self.ctx.generate_id(), rate_id, &request.description);
        self.ctx.rate_repo().create_note(&note).await?;

        info!(rate_id = %rate_id, note_id = %note.id, "Rate note added");
        Ok(NoteResponse::from(&note))
    }

    async fn find_rate(&self, rate_id: RecordId) -> ServiceResult<Rate> {
        self.ctx
            .rate_repo()
            .find_by_id(rate_id)
            .await?
            .ok_or_else(|| DomainError::RateNotFound(rate_id).into())
    }

    async fn require_port(&self, port_id: RecordId) -> ServiceResult<Port> {
        self.ctx
            .port_repo()
            .find_by_id(port_id)
            .await?
            .ok_or_else(|| DomainError::PortNotFound(port_id).into())
    }

    /// Activity payload with human-readable lane labels
    async fn describe_rate(&self, rate: &Rate) -> ServiceResult<Value> {
        let (line, pol, pod) = futures::try_join!(
            self.ctx.shipping_line_repo().find_by_id(rate.shipping_line_id),
            self.ctx.port_repo().find_by_id(rate.pol_id),
            self.ctx.port_repo().find_by_id(rate.pod_id),
        )?;
        let unknown = || "Unknown".to_string();
        Ok(rate_details(
            rate,
            &line.map_or_else(unknown, |l| l.name),
            &pol.as_ref().map_or_else(unknown, Port::label),
            &pod.as_ref().map_or_else(unknown, Port::label),
        ))
    }
}

fn find_port(ports: &[Port], id: RecordId) -> ServiceResult<&Port> {
    ports
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| DomainError::PortNotFound(id).into())
}

/// Validate submitted lines and store them in canonical form
fn canonical_lines(lines: &[StoredRateLine]) -> ServiceResult<Vec<StoredRateLine>> {
    Ok(validate_lines(lines)?.iter().map(|l| l.to_stored()).collect())
}

fn rate_details(rate: &Rate, shipping_line: &str, pol: &str, pod: &str) -> Value {
    json!({
        "shipping_line": shipping_line,
        "pol": pol,
        "pod": pod,
        "valid_from": rate.validity.valid_from,
        "valid_to": rate.validity.valid_to,
    })
}
