//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::FixedOffset;
use ratecard_core::{describe, Activity, ActivityActor, Port, RateHistory, RateNote, ShippingLine, User};

use super::responses::{
    ActivityActorResponse, ActivityResponse, NoteResponse, PortResponse, RateHistoryResponse,
    SearchHit, ShippingLineResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            company: user.company.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Reference Data Mappers
// ============================================================================

impl From<&Port> for PortResponse {
    fn from(port: &Port) -> Self {
        Self {
            id: port.id.to_string(),
            port_code: port.port_code.clone(),
            port_name: port.port_name.clone(),
            country: port.country.clone(),
            region: port.region.clone(),
            created_at: port.created_at,
            updated_at: port.updated_at,
        }
    }
}

impl From<Port> for PortResponse {
    fn from(port: Port) -> Self {
        Self::from(&port)
    }
}

impl From<&ShippingLine> for ShippingLineResponse {
    fn from(line: &ShippingLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            contact_email: line.contact_email.clone(),
            website: line.website.clone(),
            created_at: line.created_at,
            updated_at: line.updated_at,
        }
    }
}

impl From<ShippingLine> for ShippingLineResponse {
    fn from(line: ShippingLine) -> Self {
        Self::from(&line)
    }
}

impl From<&Port> for SearchHit {
    fn from(port: &Port) -> Self {
        Self {
            id: port.id.to_string(),
            label: port.search_label(),
        }
    }
}

impl From<&ShippingLine> for SearchHit {
    fn from(line: &ShippingLine) -> Self {
        Self {
            id: line.id.to_string(),
            label: line.search_label(),
        }
    }
}

// ============================================================================
// Rate Mappers
// ============================================================================

impl From<&RateNote> for NoteResponse {
    fn from(note: &RateNote) -> Self {
        Self {
            id: note.id.to_string(),
            description: note.description.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl From<RateHistory> for RateHistoryResponse {
    fn from(history: RateHistory) -> Self {
        Self {
            id: history.id.to_string(),
            rate_id: history.rate_id.to_string(),
            shipping_line_id: history.shipping_line_id.to_string(),
            pol_id: history.pol_id.to_string(),
            pod_id: history.pod_id.to_string(),
            valid_from: history.validity.valid_from,
            valid_to: history.validity.valid_to,
            container_rates: history.container_rates,
            created_at: history.created_at,
        }
    }
}

// ============================================================================
// Activity Mappers
// ============================================================================

impl From<&ActivityActor> for ActivityActorResponse {
    fn from(actor: &ActivityActor) -> Self {
        Self {
            id: actor.id.to_string(),
            name: actor.name.clone(),
            email: actor.email.clone(),
        }
    }
}

impl ActivityResponse {
    /// Render with its description, timestamp shifted to `offset`
    pub fn render(activity: &Activity, offset: FixedOffset) -> Self {
        Self {
            id: activity.id.to_string(),
            activity_type: activity.activity_type.to_string(),
            timestamp: activity.timestamp.with_timezone(&offset),
            user: activity.user.as_ref().map(ActivityActorResponse::from),
            description: describe(activity),
            data: activity.data.clone(),
        }
    }
}
