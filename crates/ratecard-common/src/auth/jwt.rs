//! JWT utilities for authentication
//!
//! Access tokens carry the acting user's identity so handlers can attribute
//! activities without a database round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use ratecard_core::{RecordId, User, UserRole};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid record id
    pub fn user_id(&self) -> Result<RecordId, AppError> {
        RecordId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user: &User) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    fn admin() -> User {
        User::new(RecordId::new(12345), "Ops", "ops@example.com", UserRole::Admin)
    }

    #[test]
    fn test_issue_token() {
        let service = create_test_service();
        let token = service.issue(&admin()).unwrap();

        assert!(!token.access_token.is_empty());
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 900);
    }

    #[test]
    fn test_claims_carry_actor() {
        let service = create_test_service();
        let token = service.issue(&admin()).unwrap();
        let claims = service.validate_access_token(&token.access_token).unwrap();

        assert_eq!(claims.sub, "12345");
        assert_eq!(claims.user_id().unwrap(), RecordId::new(12345));
        assert_eq!(claims.email, "ops@example.com");
        assert!(claims.is_admin());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        let result = service.validate_access_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_test_service().issue(&admin()).unwrap();
        let other = JwtService::new("another-secret-key-entirely-different", 900);
        assert!(other.validate_access_token(&token.access_token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new("test-secret-key-that-is-long-enough", -3600);
        let token = service.issue(&admin()).unwrap();
        let result = service.validate_access_token(&token.access_token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }
}
