//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ratecard-core.
//! Each repository handles database operations for a specific domain entity.

mod activity;
mod error;
mod port;
mod rate;
mod shipping_line;
mod user;

pub use activity::PgActivityRepository;
pub use port::PgPortRepository;
pub use rate::PgRateRepository;
pub use shipping_line::PgShippingLineRepository;
pub use user::PgUserRepository;
