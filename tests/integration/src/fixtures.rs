//! Request bodies and response shapes used by the API tests

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::helpers::next_id;

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserBody,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePortBody {
    pub port_code: String,
    pub port_name: String,
    pub country: String,
}

impl CreatePortBody {
    /// Port with a code no other test run will reuse
    pub fn unique() -> Self {
        let id = next_id();
        Self {
            port_code: format!("Q{}", id.into_inner() % 100_000_000),
            port_name: format!("Quay {id}"),
            country: "Testland".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PortBody {
    pub id: String,
    pub port_code: String,
    pub port_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateShippingLineBody {
    pub name: String,
    pub contact_email: String,
}

impl CreateShippingLineBody {
    pub fn unique() -> Self {
        let id = next_id();
        Self {
            name: format!("Carrier {id}"),
            contact_email: format!("rates-{id}@carrier.test"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShippingLineBody {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub label: String,
}

/// Rate creation body covering every POL x POD pair
pub fn create_rates_body(line_id: &str, pol_ids: &[&str], pod_ids: &[&str], lines: Value) -> Value {
    let today = Utc::now().date_naive();
    json!({
        "shipping_line": line_id,
        "pol_ids": pol_ids,
        "pod_ids": pod_ids,
        "valid_from": (today - Duration::days(1)).to_string(),
        "valid_to": (today + Duration::days(60)).to_string(),
        "container_rates": lines,
        "notes": [{"description": "Subject to equipment availability"}],
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateRatesResponse {
    pub status: String,
    pub count: usize,
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateSearchResponse {
    pub status: String,
    pub data: Vec<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_ports: i64,
    pub total_shipping_lines: i64,
    pub total_rates: i64,
}

#[derive(Debug, Deserialize)]
pub struct ActivityBody {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
}
