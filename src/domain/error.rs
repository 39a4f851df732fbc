use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn user_not_found() -> Self {
        DomainError::NotFound("User not found".to_string())
    }

    pub fn email_taken() -> Self {
        DomainError::Conflict("Email already exists".to_string())
    }

    /// Shared by every login failure so callers cannot tell an unknown email
    /// from a wrong password.
    pub fn invalid_credentials() -> Self {
        DomainError::Unauthorized("Invalid email or password".to_string())
    }
}
