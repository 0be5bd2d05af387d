//! Shipping line database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for shipping_lines table
#[derive(Debug, Clone, FromRow)]
pub struct ShippingLineModel {
    pub id: i64,
    pub name: String,
    pub contact_email: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
