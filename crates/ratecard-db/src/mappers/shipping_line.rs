//! Shipping line model -> entity mapper

use ratecard_core::entities::ShippingLine;
use ratecard_core::value_objects::RecordId;

use crate::models::ShippingLineModel;

impl From<ShippingLineModel> for ShippingLine {
    fn from(model: ShippingLineModel) -> Self {
        ShippingLine {
            id: RecordId::new(model.id),
            name: model.name,
            contact_email: model.contact_email,
            website: model.website,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
