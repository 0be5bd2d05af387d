//! Authentication handlers

use axum::{extract::State, Json};
use ratecard_service::dto::{LoginRequest, LoginResponse, UserResponse};
use ratecard_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .logout(&auth.claims)
        .await?;
    Ok(NoContent)
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = AuthService::new(state.service_context()).me(&auth.claims).await?;
    Ok(Json(user))
}
