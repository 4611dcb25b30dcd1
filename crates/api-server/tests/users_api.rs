use api_server::{router, AppState};
use application::UserApp;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const VALIDATION_MESSAGE: &str =
    "Validation Error: Invalid user data. Name, email, and age are required.";

fn app() -> Router {
    router(AppState::new(Arc::new(UserApp::new()), "User REST API"))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, value)
}

async fn create(app: &Router, name: &str, email: &str, age: i64) -> Value {
    let body = json!({ "name": name, "email": email, "age": age }).to_string();
    let (status, _, value) = send(app, Method::POST, "/api/users", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    value["data"].clone()
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = app();

    let (status, headers, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(r#"{"name":"Ann","email":"ann@x.com","age":25}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "User created successfully",
            "data": { "id": 1, "name": "Ann", "email": "ann@x.com", "age": 25 }
        })
    );
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(r#"{"id":99,"name":"Ann","email":"ann@x.com","age":25}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
}

#[tokio::test]
async fn missing_user_is_404() {
    let app = app();

    let (status, _, body) = send(&app, Method::GET, "/api/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "User not found" }));
}

#[tokio::test]
async fn incomplete_body_is_422() {
    let app = app();

    let (status, _, body) = send(&app, Method::POST, "/api/users", Some(r#"{"name":"Bad"}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "success": false, "message": VALIDATION_MESSAGE }));
}

#[tokio::test]
async fn invalid_field_values_are_422() {
    let app = app();

    for payload in [
        r#"{"name":"","email":"a@b.com","age":5}"#,
        r#"{"name":"A","email":"nodomain","age":5}"#,
        r#"{"name":"A","email":"a@b.com","age":0}"#,
        r#"{"name":"A","email":"a@b.com","age":"30"}"#,
        r#"[1,2,3]"#,
    ] {
        let (status, _, body) = send(&app, Method::POST, "/api/users", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", payload);
        assert_eq!(body["message"], VALIDATION_MESSAGE);
    }

    let (_, _, list) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();

    let truncated = r#"{"name":"Ann","email":"#;
    let (status, _, body) = send(&app, Method::POST, "/api/users", Some(truncated)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "message": "Invalid JSON format" }));

    let (status, _, body) = send(&app, Method::POST, "/api/users", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON format");
}

#[tokio::test]
async fn large_bodies_are_read_in_full() {
    let app = app();
    let padding = " ".repeat(3 * 1024 * 1024);
    let padded = format!(r#"{{"name":"Ann","email":"ann@x.com","age":25}}{}"#, padding);

    let (status, headers, body) = send(&app, Method::POST, "/api/users", Some(&padded)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["data"]["id"], 1);

    let (status, _, body) = send(&app, Method::PUT, "/api/users/1", Some(&padded)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
}

#[tokio::test]
async fn body_on_a_bodiless_route_is_ignored() {
    let app = app();
    let padded = format!("{{}}{}", " ".repeat(3 * 1024 * 1024));

    let (status, headers, body) = send(&app, Method::GET, "/api/users", Some(&padded)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["message"], "Users retrieved successfully");
}

#[tokio::test]
async fn list_returns_users_in_insertion_order() {
    let app = app();

    let (status, _, empty) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        empty,
        json!({ "success": true, "message": "Users retrieved successfully", "data": [] })
    );

    create(&app, "Ann", "ann@x.com", 25).await;
    create(&app, "Bob", "bob@x.com", 40).await;

    let (_, _, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(
        body["data"],
        json!([
            { "id": 1, "name": "Ann", "email": "ann@x.com", "age": 25 },
            { "id": 2, "name": "Bob", "email": "bob@x.com", "age": 40 }
        ])
    );
}

#[tokio::test]
async fn get_returns_the_created_user() {
    let app = app();
    let created = create(&app, "A", "a@b.com", 30).await;

    let (status, _, body) = send(&app, Method::GET, "/api/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User found");
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    create(&app, "Ann", "ann@x.com", 25).await;

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(r#"{"id":5,"name":"Anne","email":"anne@x.com","age":26}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "User updated successfully",
            "data": { "id": 1, "name": "Anne", "email": "anne@x.com", "age": 26 }
        })
    );

    let (_, _, fetched) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn update_error_statuses() {
    let app = app();
    create(&app, "Ann", "ann@x.com", 25).await;

    let valid = r#"{"name":"Anne","email":"anne@x.com","age":26}"#;
    let (status, _, body) = send(&app, Method::PUT, "/api/users/42", Some(valid)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _, _) = send(&app, Method::PUT, "/api/users/1", Some(r#"{"age":30}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _, _) = send(&app, Method::PUT, "/api/users/42", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, unchanged) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(unchanged["data"]["name"], "Ann");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    create(&app, "Ann", "ann@x.com", 25).await;

    let (status, _, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "User deleted successfully" }));

    let (status, _, _) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn ids_keep_increasing_after_delete() {
    let app = app();
    create(&app, "Ann", "ann@x.com", 25).await;
    create(&app, "Bob", "bob@x.com", 40).await;
    send(&app, Method::DELETE, "/api/users/2", None).await;

    let cat = create(&app, "Cat", "cat@x.com", 33).await;
    assert_eq!(cat["id"], 3);
}

#[tokio::test]
async fn unmatched_routes_echo_the_path() {
    let app = app();

    for (method, path) in [
        (Method::GET, "/nope"),
        (Method::GET, "/api/users/abc"),
        (Method::GET, "/api/users/1/extra"),
        (Method::POST, "/api/users/1"),
        (Method::PATCH, "/api/users/1"),
    ] {
        let (status, _, body) = send(&app, method.clone(), path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, path);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Endpoint not found", "path": path })
        );
    }
}

#[tokio::test]
async fn health_and_info() {
    let app = app();

    let (status, _, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "User REST API");
    assert!(health["timestamp"].as_i64().unwrap() > 0);

    let (status, _, info) = send(&app, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["message"], "Welcome to User REST API");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["endpoints"]["DELETE /api/users/:id"], "Delete user");
    assert_eq!(info["endpoints"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn preflight_is_200_with_empty_body() {
    let app = app();

    let (status, headers, body) = send(&app, Method::OPTIONS, "/api/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, PUT, DELETE, OPTIONS");
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = app();

    let requests = [
        (Method::GET, "/health", None),
        (Method::GET, "/api/users", None),
        (Method::GET, "/api/users/5", None),
        (Method::POST, "/api/users", Some("{")),
        (Method::POST, "/api/users", Some("{}")),
        (Method::GET, "/missing", None),
        (Method::OPTIONS, "/anything", None),
    ];

    for (method, path, body) in requests {
        let (_, headers, _) = send(&app, method, path, body).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{}", path);
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }
}
