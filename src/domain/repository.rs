use crate::domain::user::{NewUser, User, UserId};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new record under a freshly assigned id. Fails with
    /// `DomainError::Conflict` when the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    async fn exists_by_id(&self, id: UserId) -> Result<bool>;
    /// Overwrites an existing record.
    async fn save(&self, user: User) -> Result<User>;
    async fn delete_by_id(&self, id: UserId) -> Result<()>;
    async fn find_all(&self) -> Result<Vec<User>>;
}
