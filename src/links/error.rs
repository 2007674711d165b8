use thiserror::Error;

/// Errors from the link repository
#[derive(Debug, Error)]
pub enum LinkError {
    /// The owning user does not exist (foreign-key violation)
    #[error("Owner with id {0} does not exist")]
    OwnerNotFound(i32),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
