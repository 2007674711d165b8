// Request-scoped identity resolution

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::auth::{
    credentials::CredentialStore, error::AuthError, models::User, token::TokenService,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Identity placed in the request extensions by [`resolve_identity`]
#[derive(Debug, Clone)]
struct CurrentUser(User);

/// The user a request is acting as, if any.
///
/// Extracting it never fails: an anonymous request yields an empty context
/// and each operation decides whether that is acceptable.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// The resolved user, or `None` for anonymous requests
    pub fn identity(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            user: parts
                .extensions
                .get::<CurrentUser>()
                .map(|current| current.0.clone()),
        })
    }
}

/// Token carried in `Authorization: Bearer <token>`, if well formed
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?;
    let value = match value.to_str() {
        Ok(value) => value,
        Err(_) => {
            debug!("Authorization header is not valid ASCII");
            return None;
        }
    };

    match value.strip_prefix("Bearer ") {
        Some(token) => Some(token.trim()),
        None => {
            debug!("Authorization header missing 'Bearer ' prefix");
            None
        }
    }
}

/// Resolve the user behind the request's bearer token.
///
/// A missing, malformed, expired or forged token, or a subject that no longer
/// exists, yields `Ok(None)`. Only storage failures are errors.
pub async fn identify(
    headers: &HeaderMap,
    tokens: &TokenService,
    credentials: &CredentialStore,
) -> Result<Option<User>, AuthError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    let subject = match tokens.parse(token) {
        Ok(subject) => subject,
        Err(e) => {
            warn!("Ignoring bearer token: {}", e);
            return Ok(None);
        }
    };

    let user = credentials.find_by_username(&subject).await?;
    if user.is_none() {
        warn!("Token subject '{}' has no matching user", subject);
    }
    Ok(user)
}

/// Middleware attaching the caller's identity to the request
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = identify(request.headers(), &state.tokens, &state.credentials).await?;
    if let Some(user) = user {
        debug!("Request authenticated as user_id={}", user.id);
        request.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(request).await)
}
