use crate::store::DocumentStore;
use uuid::Uuid;
use wayfarer_core::models::{Role, User};
use wayfarer_core::AppError;

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    store: DocumentStore,
}

impl UserRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.collection = "users", db.operation = "find_by_id"))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    /// Fetch the user, creating the record on first touch. Accounts originate
    /// in the external auth layer; this store only carries their profile data.
    #[tracing::instrument(skip(self), fields(db.collection = "users", db.operation = "get_or_create"))]
    pub async fn get_or_create(
        &self,
        id: Uuid,
        email: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let (user, created) = {
            let mut data = self.store.write().await;
            match data.users.get(&id) {
                Some(user) => (user.clone(), false),
                None => {
                    let user = User::new(id, email, role);
                    data.users.insert(id, user.clone());
                    (user, true)
                }
            }
        };
        if created {
            self.store.persist().await?;
        }
        Ok(user)
    }

    /// Replace the user's profile image, returning the updated user and the
    /// previous reference (for reclamation).
    #[tracing::instrument(skip(self), fields(db.collection = "users", db.operation = "set_profile_image", db.record_id = %id))]
    pub async fn set_profile_image(
        &self,
        id: Uuid,
        profile_image: String,
    ) -> Result<Option<(User, Option<String>)>, AppError> {
        let result = {
            let mut data = self.store.write().await;
            match data.users.get_mut(&id) {
                Some(user) => {
                    let old = user.profile_image.replace(profile_image);
                    Some((user.clone(), old))
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

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let repo = UserRepository::new(DocumentStore::in_memory());
        let id = Uuid::new_v4();

        let first = repo.get_or_create(id, "a@example.com", Role::User).await.unwrap();
        let second = repo.get_or_create(id, "a@example.com", Role::User).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn set_profile_image_returns_old_reference() {
        let repo = UserRepository::new(DocumentStore::in_memory());
        let id = Uuid::new_v4();
        repo.get_or_create(id, "a@example.com", Role::User).await.unwrap();

        let (_, old) = repo
            .set_profile_image(id, "/uploads/profiles/first.png".to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(old.is_none());

        let (user, old) = repo
            .set_profile_image(id, "/uploads/profiles/second.png".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(old.as_deref(), Some("/uploads/profiles/first.png"));
        assert_eq!(
            user.profile_image.as_deref(),
            Some("/uploads/profiles/second.png")
        );
    }
}
