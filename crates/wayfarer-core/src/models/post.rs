use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Blog post entity. `image` holds a locally-managed public path
/// (`/uploads/posts/...`) or an external URL, or nothing for a text-only post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Post {
    pub fn from_new(new: NewPost) -> Self {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            image: new.image,
            created_at: now,
            updated_at: now,
        }
    }
}
