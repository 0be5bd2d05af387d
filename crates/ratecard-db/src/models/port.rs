//! Port database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ports table
#[derive(Debug, Clone, FromRow)]
pub struct PortModel {
    pub id: i64,
    pub port_code: String,
    pub port_name: String,
    pub country: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
