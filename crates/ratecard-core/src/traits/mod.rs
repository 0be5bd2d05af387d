mod feed;
mod repositories;

pub use feed::ActivityFeed;
pub use repositories::{
    ActivityQuery, ActivityRepository, LaneQuery, PortRepository, RateRepository, RepoResult,
    ShippingLineRepository, UserRepository,
};
