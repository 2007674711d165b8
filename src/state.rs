// Shared application state

use std::sync::Arc;

use crate::auth::{CredentialStore, TokenService, UserStore};
use crate::links::LinkStore;
use crate::resolver::Resolver;

/// Services shared by every request
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub credentials: CredentialStore,
    pub resolver: Resolver,
}

impl AppState {
    /// Wire the services over the given stores
    pub fn new(users: Arc<dyn UserStore>, links: Arc<dyn LinkStore>, tokens: TokenService) -> Self {
        let tokens = Arc::new(tokens);
        let credentials = CredentialStore::new(users);
        let resolver = Resolver::new(credentials.clone(), tokens.clone(), links);

        Self {
            tokens,
            credentials,
            resolver,
        }
    }
}
