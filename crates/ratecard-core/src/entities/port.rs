//! Port entity - a port of loading or discharge

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Port reference record. `port_code` is the immutable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: RecordId,
    pub port_code: String,
    pub port_name: String,
    pub country: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Port {
    pub fn new(
        id: RecordId,
        port_code: &str,
        port_name: &str,
        country: &str,
        region: Option<&str>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            port_code: Self::normalize_code(port_code),
            port_name: port_name.trim().to_string(),
            country: country.trim().to_string(),
            region: region.map(str::trim).unwrap_or_default().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Codes are matched trimmed and uppercased
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// `"{port_name} ({port_code})"`, used on rate rows
    pub fn label(&self) -> String {
        format!("{} ({})", self.port_name, self.port_code)
    }

    /// `"{port_name} ({port_code}) - {country}"`, used by port search
    pub fn search_label(&self) -> String {
        format!("{} ({}) - {}", self.port_name, self.port_code, self.country)
    }

    /// Apply an admin edit. The code never changes.
    pub fn apply_update(
        &mut self,
        port_name: Option<&str>,
        country: Option<&str>,
        region: Option<&str>,
    ) {
        if let Some(name) = port_name {
            self.port_name = name.trim().to_string();
        }
        if let Some(country) = country {
            self.country = country.trim().to_string();
        }
        if let Some(region) = region {
            self.region = region.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}
