// HTTP handlers
// Each one unpacks the request and hands it to the resolver

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{AuthContext, Login, NewUser, RefreshTokenInput, TokenResponse};
use crate::error::ApiError;
use crate::links::{LinkResponse, NewLink};
use crate::state::AppState;

/// Handler for POST /api/users
/// Registers a user and returns a token
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = TokenResponse),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    tracing::debug!("Creating user: {}", payload.username);
    let token = state.resolver.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Handler for POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = Login,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 401, description = "Wrong username or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Login>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.resolver.login(payload).await?;
    Ok(Json(TokenResponse { token }))
}

/// Handler for POST /api/token/refresh
#[utoipa::path(
    post,
    path = "/api/token/refresh",
    request_body = RefreshTokenInput,
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 403, description = "Token expired, forged or malformed")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenInput>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.resolver.refresh_token(payload).await?;
    Ok(Json(TokenResponse { token }))
}

/// Handler for POST /api/links
/// Requires a bearer token
#[utoipa::path(
    post,
    path = "/api/links",
    request_body = NewLink,
    responses(
        (status = 201, description = "Link created", body = LinkResponse),
        (status = 400, description = "Invalid input data"),
        (status = 403, description = "No authenticated user"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer" = [])),
    tag = "links"
)]
pub async fn create_link(
    State(state): State<AppState>,
    context: AuthContext,
    Json(payload): Json<NewLink>,
) -> Result<(StatusCode, Json<LinkResponse>), ApiError> {
    let link = state.resolver.create_link(&context, payload).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Handler for GET /api/links
#[utoipa::path(
    get,
    path = "/api/links",
    responses(
        (status = 200, description = "Every link with its owner", body = Vec<LinkResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "links"
)]
pub async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<LinkResponse>>, ApiError> {
    Ok(Json(state.resolver.links().await?))
}

/// Handler for GET /health
pub async fn health() -> &'static str {
    "ok"
}
