//! User service
//!
//! Admin-managed user accounts.

use chrono::Utc;
use ratecard_common::{hash_password, validate_password_strength};
use ratecard_core::{ActivityActor, ActivityType, DomainError, RecordId, User};
use serde_json::{json, Map, Value};
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: RecordId) -> ServiceResult<UserResponse> {
        self.find_user(user_id).await.map(UserResponse::from)
    }

    #[instrument(skip(self, request, actor), fields(email = %request.email))]
    pub async fn create(
        &self,
        request: CreateUserRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<UserResponse> {
        validate_password_strength(&request.password)?;

        let mut user = User::new(self.ctx.generate_id(), &request.name, &request.email, request.role);
        user.company = non_blank(request.company.as_deref());

        if self.ctx.user_repo().email_exists(&user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::UserCreated,
                json!({
                    "user_id": user.id.to_string(),
                    "user_details": user_details(&user),
                }),
                Some(actor),
            )
            .await;

        info!(user_id = %user.id, "User created");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, request, actor))]
    pub async fn update(
        &self,
        user_id: RecordId,
        request: UpdateUserRequest,
        actor: &ActivityActor,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.find_user(user_id).await?;
        let original = user_details(&user);
        let mut changes = Map::new();

        if let Some(name) = request.name.as_deref() {
            user.name = name.trim().to_string();
            changes.insert("name".into(), json!(user.name));
        }
        if let Some(email) = request.email.as_deref() {
            let email = User::normalize_email(email);
            if email != user.email && self.ctx.user_repo().email_exists(&email).await? {
                return Err(DomainError::EmailAlreadyExists.into());
            }
            changes.insert("email".into(), json!(email));
            user.email = email;
        }
        if let Some(role) = request.role {
            user.role = role;
            changes.insert("role".into(), json!(role));
        }
        if let Some(company) = request.company.as_deref() {
            user.company = non_blank(Some(company));
            changes.insert("company".into(), json!(user.company));
        }
        if user.name.is_empty() {
            return Err(DomainError::validation("name must not be blank").into());
        }

        let new_hash = match request.password.as_deref() {
            Some(password) => {
                validate_password_strength(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        user.updated_at = Utc::now();
        self.ctx.user_repo().update(&user).await?;
        if let Some(hash) = new_hash {
            self.ctx.user_repo().update_password(user_id, &hash).await?;
            changes.insert("password_changed".into(), Value::Bool(true));
        }

        ActivityService::new(self.ctx)
            .record(
                ActivityType::UserUpdated,
                json!({
                    "user_id": user_id.to_string(),
                    "changes": changes,
                    "original": original,
                }),
                Some(actor),
            )
            .await;

        info!(user_id = %user_id, "User updated");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, actor))]
    pub async fn delete(&self, user_id: RecordId, actor: &ActivityActor) -> ServiceResult<()> {
        let user = self.find_user(user_id).await?;
        self.ctx.user_repo().delete(user_id).await?;

        ActivityService::new(self.ctx)
            .record(
                ActivityType::UserDeleted,
                json!({
                    "user_id": user_id.to_string(),
                    "user_details": user_details(&user),
                }),
                Some(actor),
            )
            .await;

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    pub(crate) async fn find_user(&self, user_id: RecordId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}

/// Activity payload for a user; never carries credentials
fn user_details(user: &User) -> Value {
    json!({
        "name": user.name,
        "email": user.email,
        "role": user.role,
        "company": user.company.clone().unwrap_or_default(),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
