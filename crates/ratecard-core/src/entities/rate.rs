//! Rate entities - lane rates, their audit history, and annotations

use chrono::{DateTime, Utc};

use crate::rate_line::StoredRateLine;
use crate::value_objects::{RecordId, ValidityWindow};

/// Container shipping rate for one shipping line on one lane
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub id: RecordId,
    pub shipping_line_id: RecordId,
    pub pol_id: RecordId,
    pub pod_id: RecordId,
    pub validity: ValidityWindow,
    pub container_rates: Vec<StoredRateLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rate {
    pub fn new(
        id: RecordId,
        shipping_line_id: RecordId,
        pol_id: RecordId,
        pod_id: RecordId,
        validity: ValidityWindow,
        container_rates: Vec<StoredRateLine>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            shipping_line_id,
            pol_id,
            pod_id,
            validity,
            container_rates,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.validity.contains(at)
    }

    /// Capture the current field values as an audit row
    pub fn snapshot(&self, history_id: RecordId) -> RateHistory {
        RateHistory {
            id: history_id,
            rate_id: self.id,
            shipping_line_id: self.shipping_line_id,
            pol_id: self.pol_id,
            pod_id: self.pod_id,
            validity: self.validity,
            container_rates: self.container_rates.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only snapshot of a [`Rate`]
#[derive(Debug, Clone, PartialEq)]
pub struct RateHistory {
    pub id: RecordId,
    pub rate_id: RecordId,
    pub shipping_line_id: RecordId,
    pub pol_id: RecordId,
    pub pod_id: RecordId,
    pub validity: ValidityWindow,
    pub container_rates: Vec<StoredRateLine>,
    pub created_at: DateTime<Utc>,
}

/// Free-text annotation on a rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateNote {
    pub id: RecordId,
    pub rate_id: RecordId,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RateNote {
    pub fn new(id: RecordId, rate_id: RecordId, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            rate_id,
            description: description.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
