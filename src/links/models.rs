use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::UserResponse;

/// A stored link joined with its owner's username
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Link {
    pub id: i32,
    pub title: String,
    pub address: String,
    pub owner_id: i32,
    pub owner_username: String,
}

/// Input for creating a link
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewLink {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(url(message = "Address must be a valid URL"))]
    pub address: String,
}

/// Link as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    pub id: String,
    pub title: String,
    pub address: String,
    pub user: UserResponse,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title,
            address: link.address,
            user: UserResponse {
                id: link.owner_id.to_string(),
                name: link.owner_username,
            },
        }
    }
}
