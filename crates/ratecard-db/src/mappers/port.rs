//! Port model -> entity mapper

use ratecard_core::entities::Port;
use ratecard_core::value_objects::RecordId;

use crate::models::PortModel;

impl From<PortModel> for Port {
    fn from(model: PortModel) -> Self {
        Port {
            id: RecordId::new(model.id),
            port_code: model.port_code,
            port_name: model.port_name,
            country: model.country,
            region: model.region,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
