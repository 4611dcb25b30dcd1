use domain::{UserRepository, UserService};
use infrastructure::InMemoryUserRepository;
use std::sync::Arc;

/// User Application - wires the store into the domain services
///
/// Each instance owns its own store, so separate instances never share users.
pub struct UserApp {
    pub user_service: UserService,
}

impl UserApp {
    pub fn new() -> Self {
        // Infrastructure layer - process-lifetime store
        let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());

        Self::with_repository(user_repository)
    }

    /// Build the application on top of any store implementation.
    pub fn with_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        // Domain services
        let user_service = UserService::new(user_repository);

        Self { user_service }
    }
}

impl Default for UserApp {
    fn default() -> Self {
        Self::new()
    }
}
