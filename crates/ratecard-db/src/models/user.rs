//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table. The password hash is never selected here.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
