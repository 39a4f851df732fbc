use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, NewUser, UpdateUser, User, UserId};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// User lifecycle and credential checks. Holds nothing but a handle to the
/// store, so one instance can serve every worker.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.repository.find_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(user_id = id, "User not found");
            DomainError::user_not_found().into()
        })
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn create_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user creation");
        req.check()?;

        if self.repository.exists_by_email(&req.email).await? {
            warn!(email = %req.email, "User already exists");
            return Err(DomainError::email_taken().into());
        }

        let user = self.repository.insert(NewUser::from(req)).await?;
        info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Succeeds only on an exact email match whose stored password equals the
    /// supplied one byte for byte.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<()> {
        trace!("Starting login");
        let user = self
            .repository
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!("Login attempt for unknown email");
                DomainError::invalid_credentials()
            })?;

        if user.password != req.password {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(DomainError::invalid_credentials().into());
        }

        info!(user_id = user.id, "Login successful");
        Ok(())
    }

    #[instrument(skip(self, req))]
    pub async fn update_user(&self, id: UserId, req: UpdateUser) -> Result<User> {
        req.check()?;

        let mut user = self.get_user(id).await?;
        req.apply_to(&mut user);
        let user = self.repository.save(user).await?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        if !self.repository.exists_by_id(id).await? {
            warn!(user_id = id, "Delete requested for missing user");
            return Err(DomainError::user_not_found().into());
        }

        self.repository.delete_by_id(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
