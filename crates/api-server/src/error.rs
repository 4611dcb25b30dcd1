//! HTTP-edge errors.
//!
//! Keeps `DomainError` free of HTTP concerns while giving every failure a
//! fixed status code and envelope message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::DomainError;
use thiserror::Error;
use tracing::error;

use crate::response::Envelope;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON format")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid JSON format")]
    UnreadableBody(#[source] axum::Error),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound(u64),

    #[error("Endpoint not found")]
    RouteNotFound(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) | ApiError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UserNotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(message) => ApiError::Validation(message),
            DomainError::UserNotFound(id) => ApiError::UserNotFound(id),
            DomainError::RepositoryError(detail) => ApiError::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Do not leak store internals to clients.
        if let ApiError::Internal(detail) = &self {
            error!("Internal error: {}", detail);
        }

        let status = self.status_code();
        let body = Envelope::failure(self.to_string());
        let body = match self {
            ApiError::RouteNotFound(path) => body.with_path(path),
            _ => body,
        };

        (status, Json(body)).into_response()
    }
}
