//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use ratecard_core::RecordId;

use crate::response::ApiError;

/// Single `{id}` path segment parsed as a [`RecordId`]
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        parse_id(&raw).map(IdPath)
    }
}

fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid id format: {raw}")))
}
