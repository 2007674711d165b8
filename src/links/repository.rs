use axum::async_trait;
use sqlx::PgPool;

use crate::links::{Link, LinkError};

/// Storage operations for links
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a link owned by `owner_id` and return its new id
    async fn save(&self, title: &str, address: &str, owner_id: i32) -> Result<i32, LinkError>;

    /// Every link joined with its owner, fully materialised
    async fn list_all(&self) -> Result<Vec<Link>, LinkError>;
}

/// Repository for link rows in PostgreSQL
#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new LinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for LinkRepository {
    async fn save(&self, title: &str, address: &str, owner_id: i32) -> Result<i32, LinkError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO links (title, address, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(address)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return LinkError::OwnerNotFound(owner_id);
                }
            }
            LinkError::DatabaseError(e)
        })?;

        tracing::debug!("Inserted link id={} owner_id={}", id, owner_id);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Link>, LinkError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT l.id, l.title, l.address, l.user_id AS owner_id, u.username AS owner_username
            FROM links l
            INNER JOIN users u ON l.user_id = u.id
            ORDER BY l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}
