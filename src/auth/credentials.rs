// Credential store: password hashing over the user repository

use crate::auth::{
    error::AuthError, models::User, password::PasswordService, repository::UserStore,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Creates users and checks their passwords.
///
/// Every call goes to storage; nothing is cached.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Hash `password` and persist a new user
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))??;

        let user = self.users.insert(username, &hash).await?;
        info!("Created user id={} username={}", user.id, user.username);
        Ok(user)
    }

    /// True when `username` exists and `password` matches its stored hash
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let user = self.users.find_by_username(username).await?;
        let password = password.to_string();

        let verified = tokio::task::spawn_blocking(move || match user {
            Some(user) => PasswordService::verify_password(&password, &user.password_hash),
            None => {
                PasswordService::verify_against_dummy(&password);
                Ok(false)
            }
        })
        .await
        .map_err(|e| AuthError::PasswordHashError(e.to_string()))??;

        if !verified {
            debug!("Authentication failed for username={}", username);
        }
        Ok(verified)
    }

    /// Load a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        self.users.find_by_username(username).await
    }
}
