use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Uniform `{success, message, data?}` body shared by every users endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            path: None,
        }
    }
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            path: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// An envelope paired with the status it is sent under.
pub struct ApiResponse<T: Serialize = ()> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::with_data(message, data),
        }
    }

    pub fn created(message: &str, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Envelope::with_data(message, data),
        }
    }
}

impl ApiResponse {
    pub fn message(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::success(message),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
