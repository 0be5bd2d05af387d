//! Rate handlers
//!
//! Public lane search plus admin maintenance of rates, history and notes.

use axum::{extract::State, Json};
use ratecard_service::dto::{
    AddNoteRequest, CreateRatesRequest, CreateRatesResponse, NoteResponse, RateHistoryResponse,
    RateRow, RateSearchQuery, RateSearchResponse, UpdateRateRequest,
};
use ratecard_service::{RateSearchService, RateService};

use crate::extractors::{AdminUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /rates/search?pol_code=&pod_code=&include_expired=
pub async fn search_rates(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RateSearchQuery>,
) -> ApiResult<Json<RateSearchResponse>> {
    let response = RateSearchService::new(state.service_context())
        .search(query)
        .await?;
    Ok(Json(response))
}

/// GET /rates
pub async fn list_rates(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<RateRow>>> {
    let rows = RateService::new(state.service_context()).list().await?;
    Ok(Json(rows))
}

/// GET /rates/{id}
pub async fn get_rate(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(rate_id): IdPath,
) -> ApiResult<Json<RateRow>> {
    let row = RateService::new(state.service_context()).get(rate_id).await?;
    Ok(Json(row))
}

/// POST /rates
///
/// One lane via `pol`/`pod`, or the full `pol_ids` x `pod_ids` matrix.
pub async fn create_rates(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateRatesRequest>,
) -> ApiResult<Created<Json<CreateRatesResponse>>> {
    let actor = admin.actor()?;
    let response = RateService::new(state.service_context())
        .create(request, &actor)
        .await?;
    Ok(Created(Json(response)))
}

/// PUT /rates/{id}
pub async fn update_rate(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(rate_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRateRequest>,
) -> ApiResult<Json<RateRow>> {
    let actor = admin.actor()?;
    let row = RateService::new(state.service_context())
        .update(rate_id, request, &actor)
        .await?;
    Ok(Json(row))
}

/// DELETE /rates/{id}
pub async fn delete_rate(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(rate_id): IdPath,
) -> ApiResult<NoContent> {
    let actor = admin.actor()?;
    RateService::new(state.service_context())
        .delete(rate_id, &actor)
        .await?;
    Ok(NoContent)
}

/// GET /rates/{id}/history
pub async fn rate_history(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(rate_id): IdPath,
) -> ApiResult<Json<Vec<RateHistoryResponse>>> {
    let history = RateService::new(state.service_context())
        .history(rate_id)
        .await?;
    Ok(Json(history))
}

/// GET /rates/{id}/notes
pub async fn list_notes(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(rate_id): IdPath,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = RateService::new(state.service_context()).notes(rate_id).await?;
    Ok(Json(notes))
}

/// POST /rates/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(rate_id): IdPath,
    ValidatedJson(request): ValidatedJson<AddNoteRequest>,
) -> ApiResult<Created<Json<NoteResponse>>> {
    let note = RateService::new(state.service_context())
        .add_note(rate_id, request)
        .await?;
    Ok(Created(Json(note)))
}
