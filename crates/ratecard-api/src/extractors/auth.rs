//! Authentication extractors
//!
//! Validate the bearer token and expose its claims. [`AdminUser`] additionally
//! requires the admin role.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use ratecard_common::Claims;
use ratecard_core::ActivityActor;
use ratecard_service::actor_from_claims;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    /// Actor recorded on activities performed by this user
    pub fn actor(&self) -> Result<ActivityActor, ApiError> {
        actor_from_claims(&self.claims).map_err(ApiError::from)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidToken
            })?;

        Ok(AuthUser { claims })
    }
}

/// Authenticated user holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    pub fn actor(&self) -> Result<ActivityActor, ApiError> {
        self.0.actor()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.claims.is_admin() {
            tracing::warn!(user_id = %user.claims.sub, "Admin route requested by non-admin");
            return Err(ApiError::AdminRequired);
        }
        Ok(AdminUser(user))
    }
}
