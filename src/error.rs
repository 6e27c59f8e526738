//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("unknown storage backend: {0} (expected postgres or memory)")]
    UnknownStorage(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("upload: {0}")]
    Upload(#[from] std::io::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::Upload(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upload_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("point 7".into()), StatusCode::NOT_FOUND, "not_found")]
    #[case(AppError::Validation("email is required".into()), StatusCode::UNPROCESSABLE_ENTITY, "validation_error")]
    #[case(AppError::BadRequest("invalid id".into()), StatusCode::BAD_REQUEST, "bad_request")]
    #[case(AppError::Db(sqlx::Error::RowNotFound), StatusCode::NOT_FOUND, "not_found")]
    #[case(AppError::PayloadTooLarge("length limit exceeded".into()), StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large")]
    #[case(AppError::Db(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR, "database_error")]
    fn maps_errors_to_status(#[case] err: AppError, #[case] status: StatusCode, #[case] code: &str) {
        assert_eq!(err.status_and_code(), (status, code));
    }
}
