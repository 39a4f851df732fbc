use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User, UserId};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

struct Storage {
    next_id: UserId,
    users: BTreeMap<UserId, User>,
}

impl Storage {
    fn email_owner(&self, email: &str) -> Option<UserId> {
        self.users
            .values()
            .find(|u| u.email == email)
            .map(|u| u.id)
    }
}

/// Process-local user store. Ids start at 1 and are never handed out twice,
/// even after the record they belonged to is deleted.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Storage {
                next_id: 1,
                users: BTreeMap::new(),
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: NewUser) -> Result<User> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        // Unique email constraint.
        if storage.email_owner(&user.email).is_some() {
            debug!(email = %user.email, "Rejecting insert of duplicate email");
            return Err(DomainError::email_taken().into());
        }
        let id = storage.next_id;
        storage.next_id = id
            .checked_add(1)
            .ok_or_else(|| anyhow!("user id space exhausted at {id}"))?;
        let user = user.with_id(id);
        storage.users.insert(id, user.clone());
        debug!(user_id = id, email = %user.email, "User inserted into memory storage");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.users.get(&id).cloned();
        trace!(found = user.is_some(), "Looked up user by id");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.users.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let storage = self.storage.read().await;
        Ok(storage.email_owner(email).is_some())
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: UserId) -> Result<bool> {
        let storage = self.storage.read().await;
        Ok(storage.users.contains_key(&id))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn save(&self, user: User) -> Result<User> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        if !storage.users.contains_key(&user.id) {
            return Err(DomainError::user_not_found().into());
        }
        if storage
            .email_owner(&user.email)
            .is_some_and(|owner| owner != user.id)
        {
            return Err(DomainError::email_taken().into());
        }
        storage.users.insert(user.id, user.clone());
        debug!(user_id = user.id, "User saved to memory storage");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: UserId) -> Result<()> {
        let mut storage = self.storage.write().await;
        if storage.users.remove(&id).is_some() {
            debug!(user_id = id, "User removed from memory storage");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>> {
        let storage = self.storage.read().await;
        Ok(storage.users.values().cloned().collect())
    }
}
