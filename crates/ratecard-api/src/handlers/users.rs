//! User administration handlers

use axum::{extract::State, Json};
use ratecard_service::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use ratecard_service::UserService;

use crate::extractors::{AdminUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = UserService::new(state.service_context()).list().await?;
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context()).get(user_id).await?;
    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let actor = admin.actor()?;
    let user = UserService::new(state.service_context())
        .create(request, &actor)
        .await?;
    Ok(Created(Json(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let actor = admin.actor()?;
    let user = UserService::new(state.service_context())
        .update(user_id, request, &actor)
        .await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let actor = admin.actor()?;
    UserService::new(state.service_context())
        .delete(user_id, &actor)
        .await?;
    Ok(NoContent)
}
