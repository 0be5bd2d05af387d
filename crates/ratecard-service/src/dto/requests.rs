//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only `Deserialize`.
//! Ids arrive as decimal strings (plain numbers are tolerated).

use ratecard_core::{RecordId, StoredRateLine, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Rate Requests
// ============================================================================

/// Note submitted together with a new rate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub description: String,
}

/// Create one rate, or one rate per origin/destination pair
///
/// `pol`/`pod` name a single lane; `pol_ids`/`pod_ids` expand to their
/// Cartesian product. Both forms may be combined.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRatesRequest {
    pub shipping_line: RecordId,

    #[serde(default)]
    pub pol: Option<RecordId>,

    #[serde(default)]
    pub pod: Option<RecordId>,

    #[serde(default)]
    pub pol_ids: Vec<RecordId>,

    #[serde(default)]
    pub pod_ids: Vec<RecordId>,

    #[validate(length(min = 1, message = "valid_from is required"))]
    pub valid_from: String,

    #[validate(length(min = 1, message = "valid_to is required"))]
    pub valid_to: String,

    #[validate(length(min = 1, message = "container_rates must contain at least one line"))]
    pub container_rates: Vec<StoredRateLine>,

    #[serde(default)]
    pub notes: Vec<NoteInput>,
}

impl CreateRatesRequest {
    /// Origin ids in submission order, duplicates removed
    pub fn origins(&self) -> Vec<RecordId> {
        unique(self.pol.iter().chain(&self.pol_ids))
    }

    /// Destination ids in submission order, duplicates removed
    pub fn destinations(&self) -> Vec<RecordId> {
        unique(self.pod.iter().chain(&self.pod_ids))
    }
}

fn unique<'a>(ids: impl Iterator<Item = &'a RecordId>) -> Vec<RecordId> {
    let mut out: Vec<RecordId> = Vec::new();
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

/// Partial rate update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_line: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pol: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,

    #[validate(length(min = 1, message = "container_rates must contain at least one line"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_rates: Option<Vec<StoredRateLine>>,
}

/// Add a note to a rate
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddNoteRequest {
    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,
}

/// Public lane search query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateSearchQuery {
    #[serde(default)]
    pub pol_code: Option<String>,

    #[serde(default)]
    pub pod_code: Option<String>,

    #[serde(default)]
    pub include_expired: bool,
}

// ============================================================================
// Port Requests
// ============================================================================

/// Create port request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePortRequest {
    #[validate(length(min = 2, max = 10, message = "Port code must be 2-10 characters"))]
    pub port_code: String,

    #[validate(length(min = 1, max = 100, message = "Port name must be 1-100 characters"))]
    pub port_name: String,

    #[validate(length(min = 1, max = 100, message = "Country must be 1-100 characters"))]
    pub country: String,

    #[validate(length(max = 100, message = "Region must be at most 100 characters"))]
    #[serde(default)]
    pub region: Option<String>,
}

/// Update port request. The code is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePortRequest {
    #[validate(length(min = 1, max = 100, message = "Port name must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Country must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[validate(length(max = 100, message = "Region must be at most 100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// `?term=` query for reference-data search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTermQuery {
    #[serde(default)]
    pub term: Option<String>,
}

// ============================================================================
// Shipping Line Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShippingLineRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub contact_email: String,

    #[validate(length(max = 255, message = "Website must be at most 255 characters"))]
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShippingLineRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub contact_email: Option<String>,

    #[validate(length(max = 255, message = "Website must be at most 255 characters"))]
    #[serde(default)]
    pub website: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Create user request (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,

    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    #[serde(default)]
    pub company: Option<String>,
}

/// Update user request (admin). A password, when present, replaces the current one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub role: Option<UserRole>,

    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    #[serde(default)]
    pub company: Option<String>,
}

// ============================================================================
// Dashboard Queries
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentActivityQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Durable activity query; bounds accept a date or an RFC 3339 datetime
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalActivityQuery {
    #[serde(default)]
    pub skip: Option<i64>,

    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lane_matrix_request() {
        let request: CreateRatesRequest = serde_json::from_value(json!({
            "shipping_line": "7",
            "pol_ids": ["1", "2", "1"],
            "pod_ids": ["3", "4"],
            "valid_from": "2025-01-01",
            "valid_to": "2025-03-31",
            "container_rates": [{"type": "20GP", "base_rate": 3000, "baf": 200}],
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.origins(), vec![RecordId::new(1), RecordId::new(2)]);
        assert_eq!(request.destinations().len(), 2);
        assert!(request.notes.is_empty());
    }

    #[test]
    fn test_single_lane_request() {
        let request: CreateRatesRequest = serde_json::from_value(json!({
            "shipping_line": "7",
            "pol": "1",
            "pod": "3",
            "valid_from": "2025-01-01",
            "valid_to": "2025-03-31",
            "container_rates": [{"type": "40HC", "rate": 1500}],
            "notes": [{"description": "via Colombo"}, {}]
        }))
        .unwrap();

        assert_eq!(request.origins(), vec![RecordId::new(1)]);
        assert_eq!(request.destinations(), vec![RecordId::new(3)]);
        assert_eq!(request.notes.len(), 2);
    }

    #[test]
    fn test_empty_container_rates_fail_validation() {
        let request: CreateRatesRequest = serde_json::from_value(json!({
            "shipping_line": "7",
            "pol": "1",
            "pod": "3",
            "valid_from": "2025-01-01",
            "valid_to": "2025-03-31",
            "container_rates": []
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_defaults_role() {
        let request: CreateUserRequest = serde_json::from_value(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "password": "longenough"
        }))
        .unwrap();
        assert_eq!(request.role, UserRole::User);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_validation() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
