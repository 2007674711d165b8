// Authentication error types

use thiserror::Error;

/// Errors raised by the credential store and the token service
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username is already taken
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Wrong username or password")]
    WrongCredentials,

    /// Signature does not match the signing key
    #[error("Invalid token")]
    InvalidToken,

    /// Token was valid but its expiry has passed
    #[error("Token has expired")]
    ExpiredToken,

    /// Token string does not decode
    #[error("Malformed token")]
    MalformedToken,

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    /// Storage failure; never retried here
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AuthError {
    /// True for token failures, which callers treat exactly like access denial
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::MalformedToken
        )
    }
}
