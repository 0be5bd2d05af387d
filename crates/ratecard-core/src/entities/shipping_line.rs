//! Shipping line entity - a carrier offering rates

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingLine {
    pub id: RecordId,
    pub name: String,
    pub contact_email: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShippingLine {
    pub fn new(id: RecordId, name: &str, contact_email: &str, website: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.trim().to_string(),
            contact_email: Self::normalize_email(contact_email),
            website: website.map(str::trim).unwrap_or_default().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// `"{name} ({contact_email})"`, used by shipping line search
    pub fn search_label(&self) -> String {
        format!("{} ({})", self.name, self.contact_email)
    }

    pub fn apply_update(
        &mut self,
        name: Option<&str>,
        contact_email: Option<&str>,
        website: Option<&str>,
    ) {
        if let Some(name) = name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = contact_email {
            self.contact_email = Self::normalize_email(email);
        }
        if let Some(website) = website {
            self.website = website.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}
