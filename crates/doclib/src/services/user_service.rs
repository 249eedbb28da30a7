//! User registry service

use tracing::info;
use validator::Validate;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{NewUser, User};
use crate::store::LibraryStore;

pub struct UserService {
    store: LibraryStore,
}

impl UserService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<User> {
        self.store.read().await.users().cloned().collect()
    }

    pub async fn get(&self, user_id: i64) -> Option<User> {
        self.store.read().await.user(user_id).cloned()
    }

    /// Exact, case-sensitive match
    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        self.store.read().await.user_by_email(email).cloned()
    }

    /// Register a user. Duplicate emails are allowed here unless
    /// `unique_user_emails` is configured; the contribution flow does its
    /// own lookup first.
    pub async fn create(&self, new: NewUser) -> LibraryResult<User> {
        new.validate()?;
        let mut state = self.store.write().await;

        if self.store.config().unique_user_emails && state.user_by_email(&new.email).is_some() {
            return Err(LibraryError::EmailConflict { email: new.email });
        }

        let user = state.insert_user(new);
        info!(user_id = user.id, "Registered user {}", user.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryConfig;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let svc = UserService::new(LibraryStore::new(LibraryConfig::unseeded()));
        let user = svc.create(NewUser::new("An", "an@example.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(svc.get(1).await.unwrap().name, "An");
        assert_eq!(svc.get_by_email("an@example.com").await.unwrap().id, 1);
        assert!(svc.get_by_email("AN@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_allowed_by_default() {
        let svc = UserService::new(LibraryStore::new(LibraryConfig::unseeded()));
        svc.create(NewUser::new("An", "an@example.com")).await.unwrap();
        svc.create(NewUser::new("Other", "an@example.com")).await.unwrap();
        assert_eq!(svc.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_when_unique() {
        let config = LibraryConfig {
            unique_user_emails: true,
            ..LibraryConfig::unseeded()
        };
        let svc = UserService::new(LibraryStore::new(config));
        svc.create(NewUser::new("An", "an@example.com")).await.unwrap();
        let err = svc
            .create(NewUser::new("Other", "an@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::EmailConflict { .. }));
        assert_eq!(svc.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let svc = UserService::new(LibraryStore::new(LibraryConfig::unseeded()));
        let err = svc.create(NewUser::new("An", "not-an-email")).await.unwrap_err();
        assert!(matches!(err, LibraryError::Validation(_)));
        assert!(svc.create(NewUser::new("", "an@example.com")).await.is_err());
        assert!(svc.list().await.is_empty());
    }
}
