//! linkboard: share links behind token authentication.
//!
//! Users register and log in for a signed, time-bound token; the token
//! authorizes creating links, and anyone can list them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod links;
pub mod resolver;
pub mod state;

#[cfg(test)]
mod testing;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_user,
        handlers::login,
        handlers::refresh_token,
        handlers::create_link,
        handlers::list_links,
    ),
    components(
        schemas(
            auth::NewUser,
            auth::Login,
            auth::RefreshTokenInput,
            auth::TokenResponse,
            auth::UserResponse,
            links::NewLink,
            links::LinkResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Registration, login and token refresh"),
        (name = "links", description = "Shared links")
    ),
    info(
        title = "linkboard API",
        version = "0.1.0",
        description = "Link sharing with token authentication"
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Creates the application router
///
/// Every request passes through [`auth::resolve_identity`] before reaching
/// its handler.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .route("/api/users", post(handlers::create_user))
        .route("/api/login", post(handlers::login))
        .route("/api/token/refresh", post(handlers::refresh_token))
        .route(
            "/api/links",
            get(handlers::list_links).post(handlers::create_link),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::resolve_identity,
                )),
        )
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, leaving the
/// other signal in charge.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        },
    }
}
