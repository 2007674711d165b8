// Resolver layer: one method per API operation
// Holds no state of its own beyond the services it dispatches to

use std::sync::Arc;
use validator::Validate;

use crate::auth::{
    AuthContext, CredentialStore, Login, NewUser, RefreshTokenInput, TokenService,
};
use crate::error::ApiError;
use crate::links::{LinkResponse, LinkStore, NewLink};

/// Dispatches each operation to the credential store, token service and
/// link repository, enforcing the identity requirements of each.
#[derive(Clone)]
pub struct Resolver {
    credentials: CredentialStore,
    tokens: Arc<TokenService>,
    links: Arc<dyn LinkStore>,
}

impl Resolver {
    pub fn new(
        credentials: CredentialStore,
        tokens: Arc<TokenService>,
        links: Arc<dyn LinkStore>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            links,
        }
    }

    /// Register a user and return a token for them
    pub async fn create_user(&self, input: NewUser) -> Result<String, ApiError> {
        input.validate()?;

        let user = self
            .credentials
            .create_user(&input.username, &input.password)
            .await?;
        Ok(self.tokens.issue(&user.username)?)
    }

    /// Check credentials and return a token
    ///
    /// Unknown usernames and wrong passwords both yield `WrongCredentials`.
    pub async fn login(&self, input: Login) -> Result<String, ApiError> {
        if !self
            .credentials
            .authenticate(&input.username, &input.password)
            .await?
        {
            return Err(ApiError::WrongCredentials);
        }
        Ok(self.tokens.issue(&input.username)?)
    }

    /// Exchange a valid token for a new one with the same subject
    pub async fn refresh_token(&self, input: RefreshTokenInput) -> Result<String, ApiError> {
        let subject = self.tokens.parse(&input.token).map_err(|e| {
            tracing::debug!("Refresh rejected: {}", e);
            ApiError::AccessDenied
        })?;
        Ok(self.tokens.issue(&subject)?)
    }

    /// Create a link owned by the caller
    pub async fn create_link(
        &self,
        context: &AuthContext,
        input: NewLink,
    ) -> Result<LinkResponse, ApiError> {
        let owner = context.identity().ok_or(ApiError::AccessDenied)?;
        input.validate()?;

        let id = self
            .links
            .save(&input.title, &input.address, owner.id)
            .await?;
        tracing::info!("Created link id={} owner={}", id, owner.username);

        Ok(LinkResponse {
            id: id.to_string(),
            title: input.title,
            address: input.address,
            user: owner.into(),
        })
    }

    /// Every link with its owner's username
    pub async fn links(&self) -> Result<Vec<LinkResponse>, ApiError> {
        let links = self.links.list_all().await?;
        tracing::debug!("Retrieved {} links", links.len());
        Ok(links.into_iter().map(LinkResponse::from).collect())
    }
}
