//! Shipping line handlers

use axum::{extract::State, Json};
use ratecard_service::dto::{
    CreateShippingLineRequest, SearchHit, SearchTermQuery, ShippingLineResponse,
    UpdateShippingLineRequest,
};
use ratecard_service::ShippingLineService;

use crate::extractors::{AdminUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /shipping-lines
pub async fn list_shipping_lines(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ShippingLineResponse>>> {
    let lines = ShippingLineService::new(state.service_context()).list().await?;
    Ok(Json(lines))
}

/// GET /shipping-lines/search?term=
pub async fn search_shipping_lines(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchTermQuery>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let hits = ShippingLineService::new(state.service_context())
        .search(query.term.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(hits))
}

/// GET /shipping-lines/{id}
pub async fn get_shipping_line(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(line_id): IdPath,
) -> ApiResult<Json<ShippingLineResponse>> {
    let line = ShippingLineService::new(state.service_context())
        .get(line_id)
        .await?;
    Ok(Json(line))
}

/// POST /shipping-lines
pub async fn create_shipping_line(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateShippingLineRequest>,
) -> ApiResult<Created<Json<ShippingLineResponse>>> {
    let line = ShippingLineService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(line)))
}

/// PUT /shipping-lines/{id}
pub async fn update_shipping_line(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(line_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateShippingLineRequest>,
) -> ApiResult<Json<ShippingLineResponse>> {
    let line = ShippingLineService::new(state.service_context())
        .update(line_id, request)
        .await?;
    Ok(Json(line))
}

/// DELETE /shipping-lines/{id}
pub async fn delete_shipping_line(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(line_id): IdPath,
) -> ApiResult<NoContent> {
    ShippingLineService::new(state.service_context())
        .delete(line_id)
        .await?;
    Ok(NoContent)
}
