use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use catalog::{infrastructure::database::DatabaseManager, router, AppState};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn app() -> Router {
    let db = DatabaseManager::in_memory().await.unwrap();
    router(AppState::new(db.get_pool().clone()), Duration::from_secs(5))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_create_returns_201_with_assigned_id() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Red Mug", "price": 9.99, "image": "red.png"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Red Mug");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_missing_field_is_400_and_not_persisted() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Red Mug", "price": 9.99})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please provide all required fields: image");
    assert!(body.get("data").is_none());

    let (_, list) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_list_returns_repository_order() {
    let app = app().await;
    for (name, price) in [("Red Mug", 9.99), ("Blue Mug", 5.5)] {
        send(
            &app,
            Method::POST,
            "/api/products",
            Some(json!({"name": name, "price": price, "image": "mug.png"})),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Red Mug", "Blue Mug"]);
}

#[tokio::test]
async fn test_delete_then_delete_again_is_404() {
    let app = app().await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Blue Mug", "price": 5.5, "image": "blue.png"})),
    )
    .await;
    let uri = format!("/api/products/{}", created["data"]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Product deleted successfully"}));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Product not found"}));
}

#[tokio::test]
async fn test_non_uuid_id_is_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/products/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, "/api/products/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_get_by_id() {
    let app = app().await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Red Mug", "price": 9.99, "image": "red.png"})),
    )
    .await;
    let uri = format!("/api/products/{}", created["data"]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"price": 11.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 11.0);
    assert_eq!(body["data"]["name"], "Red Mug");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 11.0);
    assert_eq!(body["data"]["id"], created["data"]["id"]);
}

#[tokio::test]
async fn test_unknown_route_and_health() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_wrong_method_uses_envelope() {
    let app = app().await;
    let (status, body) = send(&app, Method::PATCH, "/api/products", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method not allowed");

    let (status, body) = send(&app, Method::POST, "/health", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
}
