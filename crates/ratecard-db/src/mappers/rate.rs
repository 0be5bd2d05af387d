//! Rate, rate history and rate note model -> entity mappers

use ratecard_core::entities::{Rate, RateHistory, RateNote};
use ratecard_core::rate_line::StoredRateLine;
use ratecard_core::value_objects::{RecordId, ValidityWindow};
use serde_json::Value;
use tracing::warn;

use crate::models::{RateHistoryModel, RateModel, RateNoteModel};

/// Decode a stored `container_rates` array element by element.
///
/// Elements that do not match the stored line shape are skipped and logged;
/// a non-array value yields no lines.
pub fn decode_rate_lines(rate_id: i64, value: Value) -> Vec<StoredRateLine> {
    let Value::Array(items) = value else {
        warn!(rate_id, "container_rates is not an array, ignoring");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<StoredRateLine>(item) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(rate_id, index, error = %e, "Skipping malformed container rate line");
                None
            }
        })
        .collect()
}

impl From<RateModel> for Rate {
    fn from(model: RateModel) -> Self {
        Rate {
            id: RecordId::new(model.id),
            shipping_line_id: RecordId::new(model.shipping_line_id),
            pol_id: RecordId::new(model.pol_id),
            pod_id: RecordId::new(model.pod_id),
            validity: ValidityWindow {
                valid_from: model.valid_from,
                valid_to: model.valid_to,
            },
            container_rates: decode_rate_lines(model.id, model.container_rates.0),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RateHistoryModel> for RateHistory {
    fn from(model: RateHistoryModel) -> Self {
        RateHistory {
            id: RecordId::new(model.id),
            rate_id: RecordId::new(model.rate_id),
            shipping_line_id: RecordId::new(model.shipping_line_id),
            pol_id: RecordId::new(model.pol_id),
            pod_id: RecordId::new(model.pod_id),
            validity: ValidityWindow {
                valid_from: model.valid_from,
                valid_to: model.valid_to,
            },
            container_rates: decode_rate_lines(model.rate_id, model.container_rates.0),
            created_at: model.created_at,
        }
    }
}

impl From<RateNoteModel> for RateNote {
    fn from(model: RateNoteModel) -> Self {
        RateNote {
            id: RecordId::new(model.id),
            rate_id: RecordId::new(model.rate_id),
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
