//! Domain entities - core business objects

mod activity;
mod port;
mod rate;
mod shipping_line;
mod user;

pub use activity::{describe, Activity, ActivityActor, ActivityType};
pub use port::Port;
pub use rate::{Rate, RateHistory, RateNote};
pub use shipping_line::ShippingLine;
pub use user::{User, UserRole};
