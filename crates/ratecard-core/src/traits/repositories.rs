//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `ratecard-db` provides the
//! PostgreSQL implementations and tests substitute in-memory ones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Activity, Port, Rate, RateHistory, RateNote, ShippingLine, User};
use crate::error::DomainError;
use crate::value_objects::{RateValidity, RecordId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Port Repository
// ============================================================================

#[async_trait]
pub trait PortRepository: Send + Sync {
    /// Find port by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Port>>;

    /// Find port by exact code. Callers pass an already normalized code.
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Port>>;

    /// Fetch several ports at once; missing ids are simply absent
    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<Port>>;

    /// List all ports ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Port>>;

    /// Case-insensitive substring match on name, code, or country
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Port>>;

    /// Create a new port
    async fn create(&self, port: &Port) -> RepoResult<()>;

    /// Update name, country and region
    async fn update(&self, port: &Port) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Shipping Line Repository
// ============================================================================

#[async_trait]
pub trait ShippingLineRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ShippingLine>>;

    /// Case-insensitive exact match on name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ShippingLine>>;

    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<ShippingLine>>;

    /// List all shipping lines ordered by name
    async fn find_all(&self) -> RepoResult<Vec<ShippingLine>>;

    /// Case-insensitive substring match on name or contact email
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<ShippingLine>>;

    async fn create(&self, line: &ShippingLine) -> RepoResult<()>;

    async fn update(&self, line: &ShippingLine) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Rate Repository
// ============================================================================

/// Filter for rates on one lane
#[derive(Debug, Clone, Copy)]
pub struct LaneQuery {
    pub pol_id: RecordId,
    pub pod_id: RecordId,
    pub validity: RateValidity,
}

#[async_trait]
pub trait RateRepository: Send + Sync {
    /// Find rate by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Rate>>;

    /// List all rates, newest first
    async fn find_all(&self) -> RepoResult<Vec<Rate>>;

    /// List rates for one origin/destination pair, ordered by creation
    async fn find_by_lane(&self, query: LaneQuery) -> RepoResult<Vec<Rate>>;

    /// Create a new rate
    async fn create(&self, rate: &Rate) -> RepoResult<()>;

    /// Overwrite the mutable fields of an existing rate
    async fn update(&self, rate: &Rate) -> RepoResult<()>;

    /// Delete a rate row. Notes are removed separately.
    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;

    /// Append an audit snapshot
    async fn append_history(&self, history: &RateHistory) -> RepoResult<()>;

    /// All snapshots for a rate, newest first
    async fn find_history(&self, rate_id: RecordId) -> RepoResult<Vec<RateHistory>>;

    async fn create_note(&self, note: &RateNote) -> RepoResult<()>;

    /// Notes for a rate, newest first
    async fn find_notes(&self, rate_id: RecordId) -> RepoResult<Vec<RateNote>>;

    /// Notes for several rates, newest first
    async fn find_notes_for_rates(&self, rate_ids: &[RecordId]) -> RepoResult<Vec<RateNote>>;

    /// Remove every note of a rate, returning how many were deleted
    async fn delete_notes(&self, rate_id: RecordId) -> RepoResult<u64>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// List all users, newest first
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Update password hash
    async fn update_password(&self, id: RecordId, password_hash: &str) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Activity Repository
// ============================================================================

/// Pagination and time range for durable activity queries
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub skip: i64,
    pub limit: i64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Persist one activity
    async fn create(&self, activity: &Activity) -> RepoResult<()>;

    /// Activities within the inclusive time range, newest first
    async fn find(&self, query: ActivityQuery) -> RepoResult<Vec<Activity>>;
}
