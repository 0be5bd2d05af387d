//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use ratecard_common::AppError;
use ratecard_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Application error (auth, token handling)
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else if e.is_unavailable() {
                    503
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
