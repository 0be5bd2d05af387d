//! Dashboard handlers

use axum::{extract::State, Json};
use ratecard_service::dto::{
    ActivityResponse, DashboardStats, HistoricalActivityQuery, RecentActivityQuery,
};
use ratecard_service::services::DEFAULT_RECENT_LIMIT;
use ratecard_service::{ActivityService, DashboardService};

use crate::extractors::{AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /dashboard/stats
pub async fn stats(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<DashboardStats>> {
    let stats = DashboardService::new(state.service_context()).stats().await?;
    Ok(Json(stats))
}

/// GET /dashboard/recent-activity?limit=N
pub async fn recent_activity(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<RecentActivityQuery>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let activities = ActivityService::new(state.service_context())
        .get_recent(limit)
        .await?;
    Ok(Json(activities))
}

/// GET /dashboard/historical-activity?skip=&limit=&start_date=&end_date=
pub async fn historical_activity(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<HistoricalActivityQuery>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let activities = ActivityService::new(state.service_context())
        .get_historical(query)
        .await?;
    Ok(Json(activities))
}
