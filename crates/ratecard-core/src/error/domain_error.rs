//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::rate_line::RateLineError;
use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Rate not found: {0}")]
    RateNotFound(RecordId),

    #[error("Port not found: {0}")]
    PortNotFound(RecordId),

    #[error("Shipping line not found: {0}")]
    ShippingLineNotFound(RecordId),

    #[error("User not found: {0}")]
    UserNotFound(RecordId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid container rate line: {0}")]
    InvalidRateLine(#[from] RateLineError),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Port code already exists: {0}")]
    PortCodeExists(String),

    #[error("Shipping line already exists: {0}")]
    ShippingLineExists(String),

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateNotFound(_) => "UNKNOWN_RATE",
            Self::PortNotFound(_) => "UNKNOWN_PORT",
            Self::ShippingLineNotFound(_) => "UNKNOWN_SHIPPING_LINE",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRateLine(_) => "INVALID_RATE_LINE",

            Self::PortCodeExists(_) => "PORT_CODE_EXISTS",
            Self::ShippingLineExists(_) => "SHIPPING_LINE_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::DatabaseUnavailable(_) | Self::CacheUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RateNotFound(_)
                | Self::PortNotFound(_)
                | Self::ShippingLineNotFound(_)
                | Self::UserNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidRateLine(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::PortCodeExists(_) | Self::ShippingLineExists(_) | Self::EmailAlreadyExists
        )
    }

    /// Backing store could not be reached (pool timeout, refused connection)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DatabaseUnavailable(_) | Self::CacheUnavailable(_))
    }

    /// Only transient infrastructure failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        self.is_unavailable()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
