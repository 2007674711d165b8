// In-memory stores for tests that do not need PostgreSQL

use crate::auth::{error::AuthError, models::User, repository::UserStore};
use crate::links::{Link, LinkError, LinkStore};
use axum::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    links: Vec<(i32, String, String, i32)>,
}

/// Users and links in one place so the foreign key can be checked
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_next: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next storage call fail like a lost connection
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn link_count(&self) -> usize {
        self.tables.lock().unwrap().links.len()
    }

    fn check_failure(&self) -> Result<(), sqlx::Error> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        self.check_failure()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AuthError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            id: tables.users.len() as i32 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        self.check_failure()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn save(&self, title: &str, address: &str, owner_id: i32) -> Result<i32, LinkError> {
        self.check_failure()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == owner_id) {
            return Err(LinkError::OwnerNotFound(owner_id));
        }

        let id = tables.links.len() as i32 + 1;
        tables
            .links
            .push((id, title.to_string(), address.to_string(), owner_id));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Link>, LinkError> {
        self.check_failure()?;
        let tables = self.tables.lock().unwrap();
        let links = tables
            .links
            .iter()
            .filter_map(|(id, title, address, owner_id)| {
                let owner = tables.users.iter().find(|u| u.id == *owner_id)?;
                Some(Link {
                    id: *id,
                    title: title.clone(),
                    address: address.clone(),
                    owner_id: *owner_id,
                    owner_username: owner.username.clone(),
                })
            })
            .collect();
        Ok(links)
    }
}
