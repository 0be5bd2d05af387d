//! Rate search service
//!
//! Resolves a lane given as two port codes, joins each rate with its shipping
//! line and ports, and normalizes the stored container lines into one shape.

use std::collections::HashMap;

use chrono::Utc;
use ratecard_core::traits::LaneQuery;
use ratecard_core::{
    NormalizedRateLine, Port, Rate, RateNote, RateValidity, RecordId, ShippingLine,
};
use tracing::{debug, instrument, warn};

use crate::dto::{NoteResponse, RateAdminFields, RateRow, RateSearchQuery, RateSearchResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

const UNKNOWN: &str = "Unknown";

/// Which columns a [`RateRow`] carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowView {
    Public,
    Admin,
}

/// Rate search service
pub struct RateSearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RateSearchService<'a> {
    /// Create a new RateSearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rates for one lane. Unknown or blank codes give an empty success.
    #[instrument(skip(self))]
    pub async fn search(&self, query: RateSearchQuery) -> ServiceResult<RateSearchResponse> {
        let pol_code = Port::normalize_code(query.pol_code.as_deref().unwrap_or_default());
        let pod_code = Port::normalize_code(query.pod_code.as_deref().unwrap_or_default());

        if pol_code.is_empty() || pod_code.is_empty() {
            return Ok(RateSearchResponse::empty(
                "No rates found: both pol_code and pod_code are required",
            ));
        }

        let ports = self.ctx.port_repo();
        let (pol, pod) = futures::try_join!(ports.find_by_code(&pol_code), ports.find_by_code(&pod_code))?;

        let (Some(pol), Some(pod)) = (pol, pod) else {
            debug!(%pol_code, %pod_code, "Lane has an unknown port code");
            return Ok(RateSearchResponse::empty(format!(
                "No rates found for {pol_code} to {pod_code}"
            )));
        };

        let validity = if query.include_expired {
            RateValidity::Any
        } else {
            RateValidity::NotExpiredAt(Utc::now())
        };

        let rates = self
            .ctx
            .rate_repo()
            .find_by_lane(LaneQuery {
                pol_id: pol.id,
                pod_id: pod.id,
                validity,
            })
            .await?;

        if rates.is_empty() {
            return Ok(RateSearchResponse::empty(format!(
                "No rates found for {} to {}",
                pol.label(),
                pod.label()
            )));
        }

        let rows = assemble_rows(self.ctx, &rates, RowView::Public).await?;
        Ok(RateSearchResponse::found(rows))
    }
}

/// Join rates with shipping lines, ports and notes, preserving input order
pub(crate) async fn assemble_rows(
    ctx: &ServiceContext,
    rates: &[Rate],
    view: RowView,
) -> ServiceResult<Vec<RateRow>> {
    if rates.is_empty() {
        return Ok(Vec::new());
    }

    let line_ids = distinct(rates.iter().map(|r| r.shipping_line_id));
    let port_ids = distinct(rates.iter().flat_map(|r| [r.pol_id, r.pod_id]));
    let rate_ids: Vec<RecordId> = rates.iter().map(|r| r.id).collect();

    let (lines, ports, notes) = futures::try_join!(
        ctx.shipping_line_repo().find_by_ids(&line_ids),
        ctx.port_repo().find_by_ids(&port_ids),
        ctx.rate_repo().find_notes_for_rates(&rate_ids),
    )?;

    let lines: HashMap<RecordId, ShippingLine> = lines.into_iter().map(|l| (l.id, l)).collect();
    let ports: HashMap<RecordId, Port> = ports.into_iter().map(|p| (p.id, p)).collect();
    let mut notes_by_rate: HashMap<RecordId, Vec<NoteResponse>> = HashMap::new();
    for note in &notes {
        notes_by_rate
            .entry(note.rate_id)
            .or_default()
            .push(NoteResponse::from(note));
    }

    Ok(rates
        .iter()
        .map(|rate| RateRow {
            id: rate.id.to_string(),
            shipping_line: lines
                .get(&rate.shipping_line_id)
                .map_or_else(|| UNKNOWN.to_string(), |l| l.name.clone()),
            pol: port_label(&ports, rate.pol_id),
            pod: port_label(&ports, rate.pod_id),
            valid_from: rate.validity.valid_from,
            valid_to: rate.validity.valid_to,
            container_rates: normalize_lines(rate),
            notes: notes_by_rate.remove(&rate.id).unwrap_or_default(),
            admin: (view == RowView::Admin).then(|| RateAdminFields {
                shipping_line_id: rate.shipping_line_id.to_string(),
                pol_id: rate.pol_id.to_string(),
                pod_id: rate.pod_id.to_string(),
                created_at: rate.created_at,
                updated_at: rate.updated_at,
            }),
        })
        .collect())
}

/// Notes as returned by the repository, newest first
pub(crate) fn note_responses(notes: &[RateNote]) -> Vec<NoteResponse> {
    notes.iter().map(NoteResponse::from).collect()
}

/// Lines that cannot be normalized are skipped, never failing the caller
pub(crate) fn normalize_lines(rate: &Rate) -> Vec<NormalizedRateLine> {
    rate.container_rates
        .iter()
        .enumerate()
        .filter_map(|(index, line)| match NormalizedRateLine::try_from(line) {
            Ok(normalized) => Some(normalized),
            Err(e) => {
                warn!(rate_id = %rate.id, index, error = %e, "Skipping malformed container rate line");
                None
            }
        })
        .collect()
}

fn port_label(ports: &HashMap<RecordId, Port>, id: RecordId) -> String {
    ports
        .get(&id)
        .map_or_else(|| UNKNOWN.to_string(), Port::label)
}

fn distinct(ids: impl Iterator<Item = RecordId>) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
