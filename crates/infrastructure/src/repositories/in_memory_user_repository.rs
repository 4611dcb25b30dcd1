use async_trait::async_trait;
use domain::{DomainError, User, UserDraft, UserRepository};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

struct UserTable {
    users: Vec<User>,
    next_id: u64,
}

/// Process-lifetime user store.
///
/// The user list and the id counter sit behind one lock so that every
/// operation, including id assignment, is atomic. Ids start at 1 and are
/// never reused, even after a delete.
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(UserTable {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserTable>, DomainError> {
        self.table
            .lock()
            .map_err(|e| DomainError::RepositoryError(format!("User table lock poisoned: {}", e)))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.lock()?.users.clone())
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let table = self.lock()?;
        Ok(table.users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(&self, fields: &UserDraft) -> Result<User, DomainError> {
        let mut table = self.lock()?;

        let mut user = User::from_draft(fields);
        user.id = table.next_id;
        table.next_id += 1;
        table.users.push(user.clone());

        debug!("Stored user {} ({} total)", user.id, table.users.len());
        Ok(user)
    }

    async fn update(&self, id: u64, fields: &UserDraft) -> Result<Option<User>, DomainError> {
        let mut table = self.lock()?;

        let Some(user) = table.users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &fields.name {
            user.name = name.clone();
        }
        if let Some(email) = &fields.email {
            user.email = email.clone();
        }
        if let Some(age) = fields.age {
            user.age = age;
        }

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        let mut table = self.lock()?;

        match table.users.iter().position(|user| user.id == id) {
            Some(index) => {
                table.users.remove(index);
                debug!("Removed user {} ({} left)", id, table.users.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
