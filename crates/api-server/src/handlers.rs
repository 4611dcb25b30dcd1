use axum::{
    body::{self, Body, Bytes},
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::{User, UserDraft};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::routes::Route;
use crate::AppState;

/// Single entry point: resolve the route table, then run the matching operation.
///
/// The body is only read by the routes that take one, so it never gates
/// routing and is never cut short by an extractor limit.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let path = parts.uri.path();

    match Route::resolve(&method, path) {
        Route::Preflight => StatusCode::OK.into_response(),
        Route::Health => health_check(&state).into_response(),
        Route::ServiceInfo => service_info(&state).into_response(),
        Route::ListUsers => list_users(&state).await.into_response(),
        Route::CreateUser => create_user(&state, body).await.into_response(),
        Route::GetUser(id) => get_user(&state, id).await.into_response(),
        Route::UpdateUser(id) => update_user(&state, id, body).await.into_response(),
        Route::DeleteUser(id) => delete_user(&state, id).await.into_response(),
        Route::NotFound => {
            warn!("{} {} - No matching route", method, path);
            ApiError::RouteNotFound(path.to_string()).into_response()
        }
    }
}

fn health_check(state: &AppState) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": state.service_name.as_str(),
    }))
}

fn service_info(state: &AppState) -> Json<Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to {}", state.service_name),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Health check",
            "GET /api/users": "Get all users",
            "GET /api/users/:id": "Get user by ID",
            "POST /api/users": "Create new user",
            "PUT /api/users/:id": "Update user",
            "DELETE /api/users/:id": "Delete user",
        },
    }))
}

async fn list_users(state: &AppState) -> ApiResult<ApiResponse<Vec<User>>> {
    let users = state.user_app.user_service.get_all_users().await?;
    info!("GET /api/users - Returning {} users", users.len());

    Ok(ApiResponse::ok("Users retrieved successfully", users))
}

async fn get_user(state: &AppState, id: u64) -> ApiResult<ApiResponse<User>> {
    let user = state
        .user_app
        .user_service
        .get_user_by_id(id)
        .await
        .inspect_err(|e| warn!("GET /api/users/{} - {}", id, e))?;

    Ok(ApiResponse::ok("User found", user))
}

async fn create_user(state: &AppState, body: Body) -> ApiResult<ApiResponse<User>> {
    let draft = read_draft(body)
        .await
        .inspect_err(|e| error!("POST /api/users - {}", e))?;

    let user = state
        .user_app
        .user_service
        .create_user(&draft)
        .await
        .inspect_err(|e| warn!("POST /api/users - {}", e))?;
    info!("POST /api/users - User created with ID: {}", user.id);

    Ok(ApiResponse::created("User created successfully", user))
}

async fn update_user(state: &AppState, id: u64, body: Body) -> ApiResult<ApiResponse<User>> {
    let draft = read_draft(body)
        .await
        .inspect_err(|e| error!("PUT /api/users/{} - {}", id, e))?;

    let user = state
        .user_app
        .user_service
        .update_user(id, &draft)
        .await
        .inspect_err(|e| warn!("PUT /api/users/{} - {}", id, e))?;
    info!("PUT /api/users/{} - User updated", id);

    Ok(ApiResponse::ok("User updated successfully", user))
}

async fn delete_user(state: &AppState, id: u64) -> ApiResult<ApiResponse> {
    state
        .user_app
        .user_service
        .delete_user(id)
        .await
        .inspect_err(|e| warn!("DELETE /api/users/{} - {}", id, e))?;
    info!("DELETE /api/users/{} - User deleted", id);

    Ok(ApiResponse::message("User deleted successfully"))
}

/// Buffer the whole body, as framed by the HTTP layer, then decode it.
async fn read_draft(body: Body) -> ApiResult<UserDraft> {
    let bytes: Bytes = body::to_bytes(body, usize::MAX)
        .await
        .map_err(ApiError::UnreadableBody)?;
    decode_body(&bytes)
}

/// Parse the buffered body as JSON, then decode it leniently into a draft.
/// An empty body is not valid JSON.
fn decode_body(body: &[u8]) -> ApiResult<UserDraft> {
    let value: Value = serde_json::from_slice(body).map_err(ApiError::InvalidJson)?;
    Ok(UserDraft::from_json(&value))
}
