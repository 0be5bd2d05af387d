//! Activity log database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for admin_activities table
#[derive(Debug, Clone, FromRow)]
pub struct ActivityModel {
    pub id: i64,
    pub activity_type: String,
    pub data: Json<Value>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub timestamp: DateTime<Utc>,
}
