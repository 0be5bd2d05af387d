//! Rate, rate history and rate note database models

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for rates table
///
/// `container_rates` stays untyped here; elements are decoded one by one in
/// the mapper so a single malformed line cannot hide the whole rate.
#[derive(Debug, Clone, FromRow)]
pub struct RateModel {
    pub id: i64,
    pub shipping_line_id: i64,
    pub pol_id: i64,
    pub pod_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub container_rates: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for rate_history table
#[derive(Debug, Clone, FromRow)]
pub struct RateHistoryModel {
    pub id: i64,
    pub rate_id: i64,
    pub shipping_line_id: i64,
    pub pol_id: i64,
    pub pod_id: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub container_rates: Json<Value>,
    pub created_at: DateTime<Utc>,
}

/// Database model for rate_notes table
#[derive(Debug, Clone, FromRow)]
pub struct RateNoteModel {
    pub id: i64,
    pub rate_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
