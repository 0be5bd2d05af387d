//! Service context - dependency container for services
//!
//! Holds the repositories, the optional activity feed, and the auth and id
//! helpers. Built once at startup and shared behind an `Arc`.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use ratecard_common::{ActivityConfig, JwtService};
use ratecard_core::traits::{
    ActivityFeed, ActivityRepository, PortRepository, RateRepository, ShippingLineRepository,
    UserRepository,
};
use ratecard_core::{IdGenerator, RecordId};

use super::error::{ServiceError, ServiceResult};

const DEFAULT_DISPLAY_OFFSET_SECS: i32 = 330 * 60;
const DEFAULT_CACHE_MAX_ATTEMPTS: u32 = 3;

/// Activity log tuning
#[derive(Debug, Clone, Copy)]
pub struct ActivitySettings {
    /// Offset activity timestamps are rendered in
    pub display_offset: FixedOffset,
    /// Attempts per feed push before degrading to durable-only
    pub cache_max_attempts: u32,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            display_offset: FixedOffset::east_opt(DEFAULT_DISPLAY_OFFSET_SECS)
                .unwrap_or_else(|| Utc.fix()),
            cache_max_attempts: DEFAULT_CACHE_MAX_ATTEMPTS,
        }
    }
}

impl From<&ActivityConfig> for ActivitySettings {
    fn from(config: &ActivityConfig) -> Self {
        Self {
            display_offset: config.display_offset(),
            cache_max_attempts: config.cache_max_attempts.max(1),
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    port_repo: Arc<dyn PortRepository>,
    shipping_line_repo: Arc<dyn ShippingLineRepository>,
    rate_repo: Arc<dyn RateRepository>,
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,

    // Recent-activity cache; absent means durable-only
    activity_feed: Option<Arc<dyn ActivityFeed>>,

    jwt_service: Arc<JwtService>,
    id_generator: Arc<IdGenerator>,
    activity_settings: ActivitySettings,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn port_repo(&self) -> &dyn PortRepository {
        self.port_repo.as_ref()
    }

    pub fn shipping_line_repo(&self) -> &dyn ShippingLineRepository {
        self.shipping_line_repo.as_ref()
    }

    pub fn rate_repo(&self) -> &dyn RateRepository {
        self.rate_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    // === Cache ===

    /// The recent-activity feed, if the cache was reachable at startup
    pub fn activity_feed(&self) -> Option<&dyn ActivityFeed> {
        self.activity_feed.as_deref()
    }

    pub fn activity_settings(&self) -> ActivitySettings {
        self.activity_settings
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("activity_feed", &self.activity_feed.is_some())
            .field("activity_settings", &self.activity_settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    port_repo: Option<Arc<dyn PortRepository>>,
    shipping_line_repo: Option<Arc<dyn ShippingLineRepository>>,
    rate_repo: Option<Arc<dyn RateRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    activity_feed: Option<Arc<dyn ActivityFeed>>,
    jwt_service: Option<Arc<JwtService>>,
    id_generator: Option<Arc<IdGenerator>>,
    activity_settings: ActivitySettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port_repo(mut self, repo: Arc<dyn PortRepository>) -> Self {
        self.port_repo = Some(repo);
        self
    }

    pub fn shipping_line_repo(mut self, repo: Arc<dyn ShippingLineRepository>) -> Self {
        self.shipping_line_repo = Some(repo);
        self
    }

    pub fn rate_repo(mut self, repo: Arc<dyn RateRepository>) -> Self {
        self.rate_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    /// Attach the recent-activity feed. Leave unset for durable-only mode.
    pub fn activity_feed(mut self, feed: Arc<dyn ActivityFeed>) -> Self {
        self.activity_feed = Some(feed);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn activity_settings(mut self, settings: ActivitySettings) -> Self {
        self.activity_settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            port_repo: required(self.port_repo, "port_repo")?,
            shipping_line_repo: required(self.shipping_line_repo, "shipping_line_repo")?,
            rate_repo: required(self.rate_repo, "rate_repo")?,
            user_repo: required(self.user_repo, "user_repo")?,
            activity_repo: required(self.activity_repo, "activity_repo")?,
            activity_feed: self.activity_feed,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            id_generator: required(self.id_generator, "id_generator")?,
            activity_settings: self.activity_settings,
        })
    }
}
