use crate::entities::{User, UserDraft};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from the user store
/// This is a PORT in hexagonal architecture
///
/// Absence is not an error: lookups return `None` and deletes return `false`.
/// Implementations assign ids themselves and never validate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
    async fn get_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;
    /// Store a new user under a freshly assigned id, ignoring any id in `fields`.
    async fn create(&self, fields: &UserDraft) -> Result<User, DomainError>;
    /// Overwrite the fields present in `fields`, keeping the others.
    async fn update(&self, id: u64, fields: &UserDraft) -> Result<Option<User>, DomainError>;
    async fn delete(&self, id: u64) -> Result<bool, DomainError>;
}
