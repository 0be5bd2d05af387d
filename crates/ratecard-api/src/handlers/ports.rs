//! Port handlers

use axum::{extract::State, Json};
use ratecard_service::dto::{
    CreatePortRequest, PortResponse, SearchHit, SearchTermQuery, UpdatePortRequest,
};
use ratecard_service::PortService;

use crate::extractors::{AdminUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /ports
pub async fn list_ports(State(state): State<AppState>) -> ApiResult<Json<Vec<PortResponse>>> {
    let ports = PortService::new(state.service_context()).list().await?;
    Ok(Json(ports))
}

/// GET /ports/search?term=
pub async fn search_ports(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchTermQuery>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let hits = PortService::new(state.service_context())
        .search(query.term.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(hits))
}

/// GET /ports/{id}
pub async fn get_port(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(port_id): IdPath,
) -> ApiResult<Json<PortResponse>> {
    let port = PortService::new(state.service_context()).get(port_id).await?;
    Ok(Json(port))
}

/// POST /ports
pub async fn create_port(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreatePortRequest>,
) -> ApiResult<Created<Json<PortResponse>>> {
    let actor = admin.actor()?;
    let port = PortService::new(state.service_context())
        .create(request, &actor)
        .await?;
    Ok(Created(Json(port)))
}

/// PUT /ports/{id}
pub async fn update_port(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(port_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePortRequest>,
) -> ApiResult<Json<PortResponse>> {
    let actor = admin.actor()?;
    let port = PortService::new(state.service_context())
        .update(port_id, request, &actor)
        .await?;
    Ok(Json(port))
}

/// DELETE /ports/{id}
pub async fn delete_port(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(port_id): IdPath,
) -> ApiResult<NoContent> {
    let actor = admin.actor()?;
    PortService::new(state.service_context())
        .delete(port_id, &actor)
        .await?;
    Ok(NoContent)
}
