use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::accounts::AccountError;
use crate::services::catalog::CatalogError;

/// HTTP-boundary error. Every failure a client can see is one of these
/// variants, rendered as `{status, code, error, message}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 - a required form field was empty or absent.
    Validation(String),
    /// 400 - registration for an email that already has an account.
    Conflict(String),
    /// 401 - bad credentials, or a missing/invalid/expired bearer token.
    Unauthorized(String),
    /// 404 - the requested catalog row does not exist.
    NotFound(String),
    /// 503 - the database could not be reached or the pool timed out.
    Unavailable(String),
    /// 500 - anything else; detail is logged, never exposed.
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Unavailable(_) => 503,
            ApiError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable slug, the same across every endpoint.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "missing_fields",
            ApiError::Conflict(_) => "user_exists",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unavailable(_) => "database_unavailable",
            ApiError::Internal(_) => "internal_server_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": "error",
            "code": self.status_code(),
            "error": self.error_code(),
            "message": self.message(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::Unavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                tracing::warn!("database unreachable: {}", err);
                ApiError::unavailable("Database temporarily unavailable")
            }
            other => {
                tracing::error!("storage error: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::MissingFields(msg) => ApiError::validation(msg),
            AccountError::EmailTaken(_) => ApiError::conflict("User already exists"),
            AccountError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            AccountError::Hash(e) => {
                tracing::error!("password hashing failed: {}", e);
                ApiError::internal("Internal server error")
            }
            AccountError::Token(e) => {
                tracing::error!("token issuance failed: {}", e);
                ApiError::internal("Internal server error")
            }
            AccountError::Database(e) => e.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(_) => ApiError::not_found("Product not found"),
            CatalogError::CategoryNotFound(_) => ApiError::not_found("Category not found"),
            CatalogError::Database(e) => e.into(),
        }
    }
}
