use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use super::SessionId;
use crate::error::ApiError;

/// Rejects the request with 401 when no session cookie is present.
#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        SessionId::from_headers(&parts.headers).ok_or_else(|| {
            debug!(uri = %parts.uri, "missing session cookie");
            ApiError::Unauthorized
        })
    }
}

/// Session cookie, if the client already has one.
#[derive(Debug)]
pub struct MaybeSession(pub Option<SessionId>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(SessionId::from_headers(&parts.headers)))
    }
}
