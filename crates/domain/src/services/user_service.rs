use crate::entities::{User, UserDraft};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use std::sync::Arc;

pub const INVALID_USER_DATA: &str = "Invalid user data. Name, email, and age are required.";

/// User Service - Contains business logic
/// Validates drafts before they reach the store and turns absence into errors
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Get all users
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.list_all().await
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, id: u64) -> Result<User, DomainError> {
        match self.user_repository.get_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    /// Create a new user with business validation
    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, DomainError> {
        ensure_valid(draft)?;
        self.user_repository.create(draft).await
    }

    /// Update user with business validation
    ///
    /// Validation runs first, so an invalid body for a missing id is a
    /// validation error rather than not-found.
    pub async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, DomainError> {
        ensure_valid(draft)?;

        match self.user_repository.update(id, draft).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    /// Delete user
    pub async fn delete_user(&self, id: u64) -> Result<(), DomainError> {
        if self.user_repository.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id))
        }
    }

    pub async fn user_exists(&self, id: u64) -> Result<bool, DomainError> {
        Ok(self.user_repository.get_by_id(id).await?.is_some())
    }
}

fn ensure_valid(draft: &UserDraft) -> Result<(), DomainError> {
    if draft.is_valid() {
        Ok(())
    } else {
        Err(DomainError::ValidationError(INVALID_USER_DATA.to_string()))
    }
}
