use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable codes carried in every error body next to the message.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJwt,
    Unauthorized,
    Forbidden,
    BadRequest,
    InternalServerError,
    AlreadyExist,
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid token: {0}")]
    InvalidJwt(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, code, error_body) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, json!(msg)),
            Error::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, json!(msg))
            }
            Error::InvalidJwt(msg) => (StatusCode::UNAUTHORIZED, ErrorCode::InvalidJwt, json!(msg)),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden, json!(msg)),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, json!(msg)),
            Error::AlreadyExists(msg) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyExist, json!(msg))
            }
            // Field-level detail, not a flattened message
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                serde_json::to_value(&errors).unwrap_or_else(|_| json!(errors.to_string())),
            ),
            Error::Json(err) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                json!(err.to_string()),
            ),
            Error::Database(err) => {
                tracing::error!(error = ?err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    json!("Internal server error"),
                )
            }
            Error::Config(msg) | Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    json!("Internal server error"),
                )
            }
            Error::Io(err) => {
                tracing::error!(error = ?err, "io error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    json!("Internal server error"),
                )
            }
            Error::Anyhow(err) => {
                tracing::error!(error = ?err, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    json!("Internal server error"),
                )
            }
        };

        let body = Json(json!({ "error": error_body, "code": code }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
