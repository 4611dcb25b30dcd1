use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User not found with id: {0}")]
    UserNotFound(u64),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}
