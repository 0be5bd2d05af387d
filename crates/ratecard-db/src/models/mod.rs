//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity;
mod port;
mod rate;
mod shipping_line;
mod user;

pub use activity::ActivityModel;
pub use port::PortModel;
pub use rate::{RateHistoryModel, RateModel, RateNoteModel};
pub use shipping_line::ShippingLineModel;
pub use user::UserModel;
