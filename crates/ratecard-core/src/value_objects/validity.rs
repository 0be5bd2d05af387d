//! Rate validity windows and lane query policies

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Inclusive `[valid_from, valid_to]` window during which a rate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

impl ValidityWindow {
    /// Build a window, rejecting `valid_from > valid_to`.
    pub fn new(valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> Result<Self, DomainError> {
        if valid_from > valid_to {
            return Err(DomainError::ValidationError(format!(
                "valid_from ({}) must not be after valid_to ({})",
                valid_from.to_rfc3339(),
                valid_to.to_rfc3339()
            )));
        }
        Ok(Self {
            valid_from,
            valid_to,
        })
    }

    /// Parse both bounds from client input. See [`parse_bound`].
    pub fn parse(valid_from: &str, valid_to: &str) -> Result<Self, DomainError> {
        Self::new(
            parse_bound(valid_from, "valid_from", BoundEdge::Start)?,
            parse_bound(valid_to, "valid_to", BoundEdge::End)?,
        )
    }

    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && at <= self.valid_to
    }

    #[inline]
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_to < at
    }
}

/// Which validity windows a lane query admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateValidity {
    /// Every rate regardless of its window
    #[default]
    Any,
    /// Rates whose `valid_to` is at or after the instant
    NotExpiredAt(DateTime<Utc>),
    /// Rates whose window contains the instant
    ValidAt(DateTime<Utc>),
}

impl RateValidity {
    pub fn admits(&self, window: &ValidityWindow) -> bool {
        match self {
            Self::Any => true,
            Self::NotExpiredAt(at) => !window.is_expired_at(*at),
            Self::ValidAt(at) => window.contains(*at),
        }
    }
}

/// Which end of a window a date-only bound describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundEdge {
    Start,
    End,
}

/// Parse an RFC 3339 datetime or a plain `YYYY-MM-DD` date.
///
/// A plain date expands to the first instant of the day for [`BoundEdge::Start`]
/// and to the last representable instant of the day for [`BoundEdge::End`].
pub fn parse_bound(raw: &str, field: &str, edge: BoundEdge) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::ValidationError(format!("{field} is required")));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        DomainError::ValidationError(format!(
            "{field} must be an ISO-8601 date (YYYY-MM-DD) or RFC 3339 datetime"
        ))
    })?;

    let time = match edge {
        BoundEdge::Start => NaiveTime::MIN,
        // timestamptz keeps microseconds
        BoundEdge::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
            .unwrap_or(NaiveTime::MIN),
    };
    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}
