//! User model -> entity mapper

use ratecard_core::entities::{User, UserRole};
use ratecard_core::value_objects::RecordId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: RecordId::new(model.id),
            name: model.name,
            email: model.email,
            role: UserRole::from_str_lossy(&model.role),
            company: model.company,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
