//! Activity model -> entity mapper

use ratecard_core::entities::{Activity, ActivityActor, ActivityType};
use ratecard_core::value_objects::RecordId;

use crate::models::ActivityModel;

impl From<ActivityModel> for Activity {
    fn from(model: ActivityModel) -> Self {
        let user = match (model.user_id, model.user_name, model.user_email) {
            (Some(id), Some(name), Some(email)) => Some(ActivityActor {
                id: RecordId::new(id),
                name,
                email,
            }),
            _ => None,
        };

        Activity {
            id: RecordId::new(model.id),
            activity_type: ActivityType::from(model.activity_type),
            data: model.data.0,
            timestamp: model.timestamp,
            user,
        }
    }
}
