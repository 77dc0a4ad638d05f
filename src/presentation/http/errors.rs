use poem::http::StatusCode;
use tracing::error;

use crate::domain::errors::DomainError;

/// Maps use case failures to HTTP errors: not found 404, validation 400, anything else 500.
pub fn api_error(err: anyhow::Error) -> poem::Error {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => {
            poem::Error::from_string(err.to_string(), StatusCode::NOT_FOUND)
        }
        Some(DomainError::Validation(_)) => {
            poem::Error::from_string(err.to_string(), StatusCode::BAD_REQUEST)
        }
        _ => internal_error(err),
    }
}

pub fn internal_error(err: anyhow::Error) -> poem::Error {
    error!(error = %err, "request failed");
    poem::Error::from_string(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn bad_request(message: impl Into<String>) -> poem::Error {
    poem::Error::from_string(message.into(), StatusCode::BAD_REQUEST)
}
