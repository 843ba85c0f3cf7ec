use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;

/// Client-facing guestbook failures. Messages are fixed; details stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Name and message are required")]
    InvalidInput,
    #[error("Failed to save message")]
    Storage,
    #[error("Failed to save message")]
    MalformedBody,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Storage | ApiError::MalformedBody => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidInput(_) => ApiError::InvalidInput,
            ServiceError::Storage(_) => ApiError::Storage,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}
