//! Container rate lines
//!
//! Rates carry one line per container type. Over time two shapes have been
//! persisted for the same concept:
//!
//! - a flat line: `{"type": "20GP", "rate": 1500}`
//! - an itemized line: `{"type": "40HC", "base_rate": 3000, "baf": 200, ...}`
//!
//! [`StoredRateLine`] is the permissive on-disk shape (every amount optional,
//! numeric strings tolerated). [`ContainerRateLine`] is the validated tagged
//! form, and [`NormalizedRateLine`] is the single output schema every caller
//! sees.
//!
//! Classification order for a stored line:
//! 1. any itemized component present -> [`ContainerRateLine::Itemized`]
//!    (absent components count as 0)
//! 2. otherwise a `rate` -> [`ContainerRateLine::Flat`]
//! 3. otherwise a pre-computed `total_cost` -> [`ContainerRateLine::Flat`]
//! 4. otherwise [`RateLineError::MissingAmount`]
//!
//! `total_cost = base_rate + ewrs_laden + ewrs_empty + baf + reefer_surcharge`

mod amount;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Permissive persisted form of a container rate line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRateLine {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub ewrs_laden: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub ewrs_empty: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub baf: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub reefer_surcharge: Option<f64>,
    #[serde(default, deserialize_with = "amount::lenient", skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl StoredRateLine {
    fn has_components(&self) -> bool {
        self.base_rate.is_some()
            || self.ewrs_laden.is_some()
            || self.ewrs_empty.is_some()
            || self.baf.is_some()
            || self.reefer_surcharge.is_some()
    }
}

/// Itemized surcharge breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateComponents {
    pub base_rate: f64,
    pub ewrs_laden: f64,
    pub ewrs_empty: f64,
    pub baf: f64,
    pub reefer_surcharge: f64,
}

impl RateComponents {
    pub fn total(&self) -> f64 {
        self.base_rate + self.ewrs_laden + self.ewrs_empty + self.baf + self.reefer_surcharge
    }
}

/// Validated container rate line
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerRateLine {
    Flat {
        container_type: String,
        rate: f64,
    },
    Itemized {
        container_type: String,
        components: RateComponents,
    },
}

impl ContainerRateLine {
    pub fn container_type(&self) -> &str {
        match self {
            Self::Flat { container_type, .. } | Self::Itemized { container_type, .. } => {
                container_type
            }
        }
    }

    pub fn total_cost(&self) -> f64 {
        match self {
            Self::Flat { rate, .. } => *rate,
            Self::Itemized { components, .. } => components.total(),
        }
    }

    /// Project onto the common output schema
    pub fn normalize(&self) -> NormalizedRateLine {
        let components = match self {
            Self::Flat { .. } => RateComponents::default(),
            Self::Itemized { components, .. } => *components,
        };
        NormalizedRateLine {
            container_type: self.container_type().to_string(),
            base_rate: components.base_rate,
            ewrs_laden: components.ewrs_laden,
            ewrs_empty: components.ewrs_empty,
            baf: components.baf,
            reefer_surcharge: components.reefer_surcharge,
            total_cost: self.total_cost(),
        }
    }

    /// Canonical persisted form, with `total_cost` always filled in
    pub fn to_stored(&self) -> StoredRateLine {
        match self {
            Self::Flat {
                container_type,
                rate,
            } => StoredRateLine {
                container_type: Some(container_type.clone()),
                rate: Some(*rate),
                total_cost: Some(*rate),
                ..StoredRateLine::default()
            },
            Self::Itemized {
                container_type,
                components,
            } => StoredRateLine {
                container_type: Some(container_type.clone()),
                rate: None,
                base_rate: Some(components.base_rate),
                ewrs_laden: Some(components.ewrs_laden),
                ewrs_empty: Some(components.ewrs_empty),
                baf: Some(components.baf),
                reefer_surcharge: Some(components.reefer_surcharge),
                total_cost: Some(components.total()),
            },
        }
    }
}

impl TryFrom<&StoredRateLine> for ContainerRateLine {
    type Error = RateLineError;

    fn try_from(line: &StoredRateLine) -> Result<Self, Self::Error> {
        let container_type = line
            .container_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RateLineError::MissingType)?
            .to_string();

        let check = |field: &'static str, value: Option<f64>| -> Result<f64, RateLineError> {
            let value = value.unwrap_or(0.0);
            if !value.is_finite() || value < 0.0 {
                return Err(RateLineError::InvalidAmount {
                    container_type: container_type.clone(),
                    field,
                });
            }
            Ok(value)
        };

        if line.has_components() {
            let components = RateComponents {
                base_rate: check("base_rate", line.base_rate)?,
                ewrs_laden: check("ewrs_laden", line.ewrs_laden)?,
                ewrs_empty: check("ewrs_empty", line.ewrs_empty)?,
                baf: check("baf", line.baf)?,
                reefer_surcharge: check("reefer_surcharge", line.reefer_surcharge)?,
            };
            return Ok(Self::Itemized {
                container_type,
                components,
            });
        }

        let (field, amount) = match (line.rate, line.total_cost) {
            (Some(rate), _) => ("rate", rate),
            (None, Some(total)) => ("total_cost", total),
            (None, None) => return Err(RateLineError::MissingAmount { container_type }),
        };
        let rate = check(field, Some(amount))?;
        Ok(Self::Flat {
            container_type,
            rate,
        })
    }
}

/// The single output schema for a container rate line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRateLine {
    #[serde(rename = "type")]
    pub container_type: String,
    pub base_rate: f64,
    pub ewrs_laden: f64,
    pub ewrs_empty: f64,
    pub baf: f64,
    pub reefer_surcharge: f64,
    pub total_cost: f64,
}

impl TryFrom<&StoredRateLine> for NormalizedRateLine {
    type Error = RateLineError;

    fn try_from(line: &StoredRateLine) -> Result<Self, Self::Error> {
        ContainerRateLine::try_from(line).map(|l| l.normalize())
    }
}

/// Reasons a stored or submitted line cannot be normalized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLineError {
    #[error("container rate line is missing its type")]
    MissingType,

    #[error("container rate line {container_type} has no rate, components, or total_cost")]
    MissingAmount { container_type: String },

    #[error("container rate line {container_type} has an invalid {field} (must be a non-negative number)")]
    InvalidAmount {
        container_type: String,
        field: &'static str,
    },
}

/// Validate submitted lines, failing on the first bad one.
pub fn validate_lines(lines: &[StoredRateLine]) -> Result<Vec<ContainerRateLine>, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::ValidationError(
            "container_rates must contain at least one line".to_string(),
        ));
    }
    lines
        .iter()
        .map(|line| ContainerRateLine::try_from(line).map_err(DomainError::from))
        .collect()
}
