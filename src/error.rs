use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::meals::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized.")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized.").into_response(),
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Validation error.", "issues": err.issues })),
            )
                .into_response(),
            ApiError::MalformedBody(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Validation error.",
                    "issues": [{ "field": "body", "message": rejection.body_text() }],
                })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!(error = %format!("{e:#}"), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ValidationError::single("name", "too long"))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("db down")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
