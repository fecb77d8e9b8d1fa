use crate::store::DocumentStore;
use uuid::Uuid;
use validator::Validate;
use wayfarer_core::models::{NewPost, Post};
use wayfarer_core::AppError;

/// Repository for blog posts
#[derive(Clone)]
pub struct PostRepository {
    store: DocumentStore,
}

impl PostRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.collection = "posts", db.operation = "find_by_id"))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    /// All posts, newest first.
    #[tracing::instrument(skip(self), fields(db.collection = "posts", db.operation = "find"))]
    pub async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let data = self.store.read().await;
        let mut posts: Vec<Post> = data.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    #[tracing::instrument(skip(self, new), fields(db.collection = "posts", db.operation = "create"))]
    pub async fn create(&self, new: NewPost) -> Result<Post, AppError> {
        new.validate()?;
        let post = Post::from_new(new);
        self.store.write().await.posts.insert(post.id, post.clone());
        self.store.persist().await?;
        Ok(post)
    }

    /// Replace the post's image reference, returning the updated post and the
    /// previous reference (for reclamation), or `None` when the id is unknown.
    #[tracing::instrument(skip(self), fields(db.collection = "posts", db.operation = "set_image", db.record_id = %id))]
    pub async fn set_image(
        &self,
        id: Uuid,
        image: String,
    ) -> Result<Option<(Post, Option<String>)>, AppError> {
        let result = {
            let mut data = self.store.write().await;
            match data.posts.get_mut(&id) {
                Some(post) => {
                    let old = post.image.replace(image);
                    post.updated_at = chrono::Utc::now();
                    Some((post.clone(), old))
                }
                None => None,
            }
        };
        if result.is_some() {
            self.store.persist().await?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> PostRepository {
        PostRepository::new(DocumentStore::in_memory())
    }

    #[tokio::test]
    async fn set_image_returns_previous_reference() {
        let repo = repo();
        let post = repo
            .create(NewPost {
                title: "Hunza in spring".to_string(),
                content: "Apricot blossoms everywhere".to_string(),
                image: Some("/uploads/posts/old-1.jpg".to_string()),
            })
            .await
            .unwrap();

        let (updated, old) = repo
            .set_image(post.id, "/uploads/posts/new-2.jpg".to_string())
            .await
            .unwrap()
            .expect("post exists");

        assert_eq!(updated.image.as_deref(), Some("/uploads/posts/new-2.jpg"));
        assert_eq!(old.as_deref(), Some("/uploads/posts/old-1.jpg"));

        assert!(repo
            .set_image(Uuid::new_v4(), "x".to_string())
            .await
            .unwrap()
            .is_none());
    }
}
