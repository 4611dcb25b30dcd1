//! Route table for the HTTP surface.
//!
//! Routing is an exact-match table evaluated top to bottom:
//!
//! | Method  | Path              | Route            |
//! |---------|-------------------|------------------|
//! | OPTIONS | any               | `Preflight`      |
//! | GET     | `/health`         | `Health`         |
//! | GET     | `/api`            | `ServiceInfo`    |
//! | GET     | `/api/users`      | `ListUsers`      |
//! | POST    | `/api/users`      | `CreateUser`     |
//! | GET     | `/api/users/{id}` | `GetUser(id)`    |
//! | PUT     | `/api/users/{id}` | `UpdateUser(id)` |
//! | DELETE  | `/api/users/{id}` | `DeleteUser(id)` |
//!
//! Anything else resolves to `NotFound`. `{id}` must be the final segment and
//! consist only of ASCII digits that fit in a `u64`.

use axum::http::Method;

const USERS_PATH: &str = "/api/users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Health,
    ServiceInfo,
    ListUsers,
    CreateUser,
    GetUser(u64),
    UpdateUser(u64),
    DeleteUser(u64),
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Self {
        if *method == Method::OPTIONS {
            return Route::Preflight;
        }

        match (method, path) {
            (&Method::GET, "/health") => return Route::Health,
            (&Method::GET, "/api") => return Route::ServiceInfo,
            (&Method::GET, USERS_PATH) => return Route::ListUsers,
            (&Method::POST, USERS_PATH) => return Route::CreateUser,
            _ => {}
        }

        let Some(id) = parse_user_id(path) else {
            return Route::NotFound;
        };

        match *method {
            Method::GET => Route::GetUser(id),
            Method::PUT => Route::UpdateUser(id),
            Method::DELETE => Route::DeleteUser(id),
            _ => Route::NotFound,
        }
    }
}

/// Extract `{id}` from `/api/users/{id}`.
pub fn parse_user_id(path: &str) -> Option<u64> {
    let segment = path.strip_prefix(USERS_PATH)?.strip_prefix('/')?;

    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    segment.parse().ok()
}
