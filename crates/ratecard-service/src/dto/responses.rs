//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, FixedOffset, Utc};
use ratecard_core::{NormalizedRateLine, StoredRateLine, UserRole};
use serde::Serialize;
use serde_json::Value;

const SUCCESS: &str = "success";

// ============================================================================
// Auth Responses
// ============================================================================

/// Login response with an access token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// User profile; the password hash never leaves the repository
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Reference Data Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PortResponse {
    pub id: String,
    pub port_code: String,
    pub port_name: String,
    pub country: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShippingLineResponse {
    pub id: String,
    pub name: String,
    pub contact_email: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typeahead hit for ports and shipping lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub label: String,
}

// ============================================================================
// Rate Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reference ids and timestamps shown on admin views only
#[derive(Debug, Clone, Serialize)]
pub struct RateAdminFields {
    pub shipping_line_id: String,
    pub pol_id: String,
    pub pod_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One rate joined with its reference data, lines normalized
#[derive(Debug, Clone, Serialize)]
pub struct RateRow {
    pub id: String,
    pub shipping_line: String,
    pub pol: String,
    pub pod: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub container_rates: Vec<NormalizedRateLine>,
    pub notes: Vec<NoteResponse>,
    #[serde(flatten)]
    pub admin: Option<RateAdminFields>,
}

/// Public search envelope
#[derive(Debug, Serialize)]
pub struct RateSearchResponse {
    pub status: &'static str,
    pub data: Vec<RateRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RateSearchResponse {
    pub fn found(rows: Vec<RateRow>) -> Self {
        Self {
            status: SUCCESS,
            data: rows,
            message: None,
        }
    }

    /// Empty result is still a success
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            data: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Result of creating one or more rates
#[derive(Debug, Serialize)]
pub struct CreateRatesResponse {
    pub status: &'static str,
    pub message: String,
    pub count: usize,
    pub ids: Vec<String>,
}

impl CreateRatesResponse {
    pub fn created(ids: Vec<String>) -> Self {
        Self {
            status: SUCCESS,
            message: format!("Successfully created {} rates", ids.len()),
            count: ids.len(),
            ids,
        }
    }
}

/// Audit snapshot of a rate, lines as stored
#[derive(Debug, Clone, Serialize)]
pub struct RateHistoryResponse {
    pub id: String,
    pub rate_id: String,
    pub shipping_line_id: String,
    pub pol_id: String,
    pub pod_id: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub container_rates: Vec<StoredRateLine>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Activity & Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ActivityActorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Activity rendered for display
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub timestamp: DateTime<FixedOffset>,
    pub user: Option<ActivityActorResponse>,
    pub description: String,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_ports: i64,
    pub total_shipping_lines: i64,
    pub total_rates: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Cache state as seen by the readiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHealth {
    Healthy,
    Unhealthy,
    /// No cache configured or reachable at startup
    Disabled,
}

impl CacheHealth {
    fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Disabled => "disabled",
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub cache: String,
}

impl ReadinessResponse {
    /// A missing or failing cache degrades the service; a failing database stops it
    pub fn evaluate(database_healthy: bool, cache: CacheHealth) -> Self {
        let status = match (database_healthy, cache) {
            (false, _) => "not_ready",
            (true, CacheHealth::Healthy) => "ready",
            (true, _) => "degraded",
        };
        Self {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                cache: cache.as_str().to_string(),
            },
        }
    }

    pub fn is_serving(&self) -> bool {
        self.status != "not_ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_envelope() {
        let value = serde_json::to_value(RateSearchResponse::empty("No rates found")).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], serde_json::json!([]));
        assert_eq!(value["message"], "No rates found");

        let value = serde_json::to_value(RateSearchResponse::found(Vec::new())).unwrap();
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_rate_row_flattens_admin_fields() {
        let now = Utc::now();
        let mut row = RateRow {
            id: "1".to_string(),
            shipping_line: "Unknown".to_string(),
            pol: "Mundra (INMUN)".to_string(),
            pod: "Singapore (SGSIN)".to_string(),
            valid_from: now,
            valid_to: now,
            container_rates: Vec::new(),
            notes: Vec::new(),
            admin: None,
        };
        let public = serde_json::to_value(&row).unwrap();
        assert!(public.get("pol_id").is_none());

        row.admin = Some(RateAdminFields {
            shipping_line_id: "9".to_string(),
            pol_id: "2".to_string(),
            pod_id: "3".to_string(),
            created_at: now,
            updated_at: now,
        });
        let admin = serde_json::to_value(&row).unwrap();
        assert_eq!(admin["pol_id"], "2");
        assert_eq!(admin["shipping_line"], "Unknown");
    }

    #[test]
    fn test_create_rates_message() {
        let response = CreateRatesResponse::created(vec!["1".into(), "2".into()]);
        assert_eq!(response.count, 2);
        assert_eq!(response.message, "Successfully created 2 rates");
    }

    #[test]
    fn test_readiness_states() {
        let ready = ReadinessResponse::evaluate(true, CacheHealth::Healthy);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.cache, "healthy");

        let degraded = ReadinessResponse::evaluate(true, CacheHealth::Disabled);
        assert_eq!(degraded.status, "degraded");
        assert!(degraded.is_serving());

        let down = ReadinessResponse::evaluate(false, CacheHealth::Healthy);
        assert_eq!(down.status, "not_ready");
        assert_eq!(down.checks.database, "unhealthy");
        assert!(!down.is_serving());
    }
}
