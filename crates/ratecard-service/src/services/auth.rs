//! Authentication service
//!
//! Handles login, logout and the current-user lookup. Access tokens carry
//! the actor recorded on activities.

use ratecard_common::{verify_password, AppError, Claims};
use ratecard_core::{ActivityActor, ActivityType, User};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, UserResponse};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Actor recorded for activities performed with these claims
///
/// # Errors
/// Returns `InvalidToken` if the subject is not a record id
pub fn actor_from_claims(claims: &Claims) -> ServiceResult<ActivityActor> {
    Ok(ActivityActor {
        id: claims.user_id()?,
        name: claims.name.clone(),
        email: claims.email.clone(),
    })
}

fn actor_of(user: &User) -> ActivityActor {
    ActivityActor {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let email = User::normalize_email(&request.email);

        let user = self.ctx.user_repo().find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login failed: unknown email");
            AppError::InvalidCredentials
        })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let token = self.ctx.jwt_service().issue(&user)?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::UserLogin,
                json!({"user_email": user.email, "role": user.role}),
                Some(&actor_of(&user)),
            )
            .await;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserResponse::from(user),
        })
    }

    /// Tokens are stateless; logout only records the event
    #[instrument(skip(self, claims), fields(user_id = %claims.sub))]
    pub async fn logout(&self, claims: &Claims) -> ServiceResult<()> {
        let actor = actor_from_claims(claims)?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::UserLogout,
                json!({"user_email": claims.email, "role": claims.role}),
                Some(&actor),
            )
            .await;

        info!("User logged out");
        Ok(())
    }

    /// Current user behind a validated token
    #[instrument(skip(self, claims), fields(user_id = %claims.sub))]
    pub async fn me(&self, claims: &Claims) -> ServiceResult<UserResponse> {
        let user_id = claims.user_id()?;
        UserService::new(self.ctx)
            .find_user(user_id)
            .await
            .map(UserResponse::from)
    }
}
