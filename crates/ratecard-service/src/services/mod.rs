//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repository calls, validation and activity logging.

pub mod activity;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod port;
pub mod rate;
pub mod rate_search;
pub mod shipping_line;
pub mod user;

pub use activity::{ActivityService, DEFAULT_HISTORICAL_LIMIT, DEFAULT_RECENT_LIMIT, MAX_ACTIVITY_PAGE};
pub use auth::{actor_from_claims, AuthService};
pub use context::{ActivitySettings, ServiceContext, ServiceContextBuilder};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use port::PortService;
pub use rate::RateService;
pub use rate_search::RateSearchService;
pub use shipping_line::ShippingLineService;
pub use user::UserService;
