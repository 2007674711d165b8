// Error handling for the linkboard API
// Maps every resolver failure onto an HTTP status and a JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::auth::AuthError;
use crate::links::LinkError;

/// Error type returned by every resolver operation
///
/// Policy errors (duplicate username, wrong credentials, access denied) and
/// token errors are expected and reported as-is. Persistence and internal
/// errors are logged in full and reported with a generic message.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Maps to HTTP 409 Conflict
    DuplicateUsername(String),

    /// Unknown user or wrong password
    /// Maps to HTTP 401 Unauthorized
    WrongCredentials,

    /// Operation needs an identity the request does not carry
    /// Maps to HTTP 403 Forbidden
    AccessDenied,

    /// Maps to HTTP 401 Unauthorized
    InvalidToken,

    /// Maps to HTTP 401 Unauthorized
    ExpiredToken,

    /// Maps to HTTP 401 Unauthorized
    MalformedToken,

    /// Storage failure or constraint violation
    /// Maps to HTTP 500, details stay in the logs
    PersistenceError(String),

    /// Maps to HTTP 500, details stay in the logs
    InternalError(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "ACCESS_DENIED")
    pub error_code: String,

    /// Human-readable message, safe to show to clients
    pub message: String,

    /// Field-level validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let details = match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                Some(serde_json::to_value(errors).unwrap_or(serde_json::json!({})))
            }
            ApiError::DuplicateUsername(username) => {
                debug!("Duplicate username: {}", username);
                None
            }
            ApiError::WrongCredentials => {
                warn!("Login rejected: wrong username or password");
                None
            }
            ApiError::AccessDenied => {
                warn!("Access denied");
                None
            }
            ApiError::InvalidToken | ApiError::ExpiredToken | ApiError::MalformedToken => {
                warn!("Token rejected: {}", self.error_code());
                None
            }
            ApiError::PersistenceError(msg) => {
                error!("Persistence error: {}", msg);
                None
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                None
            }
        };

        (
            self.status_code(),
            ErrorResponse {
                error_code: self.error_code().to_string(),
                message: self.error_message(),
                details,
                timestamp: Utc::now().to_rfc3339(),
            },
        )
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateUsername(_) => StatusCode::CONFLICT,
            ApiError::WrongCredentials => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::ExpiredToken => StatusCode::UNAUTHORIZED,
            ApiError::MalformedToken => StatusCode::UNAUTHORIZED,
            ApiError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            ApiError::WrongCredentials => "WRONG_CREDENTIALS",
            ApiError::AccessDenied => "ACCESS_DENIED",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::ExpiredToken => "EXPIRED_TOKEN",
            ApiError::MalformedToken => "MALFORMED_TOKEN",
            ApiError::PersistenceError(_) => "PERSISTENCE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to send to clients (no internal detail)
    pub fn error_message(&self) -> String {
        match self {
            ApiError::ValidationError(_) => "Request validation failed".to_string(),
            ApiError::DuplicateUsername(username) => {
                format!("Username '{}' already exists", username)
            }
            ApiError::WrongCredentials => "Wrong username or password".to_string(),
            ApiError::AccessDenied => "Access denied".to_string(),
            ApiError::InvalidToken => "Invalid token".to_string(),
            ApiError::ExpiredToken => "Token has expired".to_string(),
            ApiError::MalformedToken => "Malformed token".to_string(),
            ApiError::PersistenceError(_) => "A storage error occurred".to_string(),
            ApiError::InternalError(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUsername(username) => ApiError::DuplicateUsername(username),
            AuthError::WrongCredentials => ApiError::WrongCredentials,
            AuthError::InvalidToken => ApiError::InvalidToken,
            AuthError::ExpiredToken => ApiError::ExpiredToken,
            AuthError::MalformedToken => ApiError::MalformedToken,
            AuthError::DatabaseError(e) => ApiError::PersistenceError(e.to_string()),
            AuthError::PasswordHashError(msg) => ApiError::InternalError(msg),
            AuthError::TokenGenerationError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        ApiError::PersistenceError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}
