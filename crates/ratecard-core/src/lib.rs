//! # ratecard-core
//!
//! Domain layer containing entities, value objects, rate line normalization,
//! and the repository and feed traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod rate_line;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    describe, Activity, ActivityActor, ActivityType, Port, Rate, RateHistory, RateNote,
    ShippingLine, User, UserRole,
};
pub use error::DomainError;
pub use rate_line::{
    validate_lines, ContainerRateLine, NormalizedRateLine, RateComponents, RateLineError,
    StoredRateLine,
};
pub use traits::{
    ActivityFeed, ActivityQuery, ActivityRepository, LaneQuery, PortRepository, RateRepository,
    RepoResult, ShippingLineRepository, UserRepository,
};
pub use value_objects::{
    parse_bound, BoundEdge, IdGenerator, RateValidity, RecordId, RecordIdError, ValidityWindow,
};
