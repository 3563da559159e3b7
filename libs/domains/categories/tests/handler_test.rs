//! Handler tests for the Categories domain
//!
//! These drive the category router with in-memory storage and check:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes and error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{ErrorResponse, Page};
use domain_categories::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(CategoryService::new(InMemoryCategoryRepository::new()))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, name: &str) -> Category {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "nameCategory": name })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_category_returns_201() {
    let app = app();

    let category = create(&app, "Electronics").await;

    assert_eq!(category.id, 1);
    assert_eq!(category.name, "Electronics");
}

#[tokio::test]
async fn test_create_category_with_id_returns_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "id": 4, "nameCategory": "Electronics" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, vec!["New category cannot have an ID"]);
}

#[tokio::test]
async fn test_create_category_validates_name() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "nameCategory": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, vec!["Category name cannot be blank"]);

    let response = app()
        .oneshot(json_request("POST", "/", json!({})))
        .await
        .unwrap();
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, vec!["Category name is required."]);
}

#[tokio::test]
async fn test_get_category_round_trip() {
    let app = app();
    let created = create(&app, "Garden").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "id": created.id, "nameCategory": "Garden" }));
}

#[tokio::test]
async fn test_get_missing_category_returns_empty_404() {
    let response = app().oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_malformed_path_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_category_replaces_name() {
    let app = app();
    let created = create(&app, "Toys").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "id": created.id, "nameCategory": "Games" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Category = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Games");
}

#[tokio::test]
async fn test_update_category_rejections() {
    let app = app();
    let created = create(&app, "Toys").await;
    let uri = format!("/{}", created.id);

    let cases = [
        (json!({ "nameCategory": "Games" }), "Invalid id, id can not be null"),
        (
            json!({ "id": created.id + 1, "nameCategory": "Games" }),
            "Invalid ID",
        ),
    ];

    for (body, expected) in cases {
        let response = app
            .clone()
            .oneshot(json_request("PUT", &uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.message, vec![expected]);
    }

    let response = app
        .oneshot(json_request(
            "PUT",
            "/50",
            json!({ "id": 50, "nameCategory": "Games" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, vec!["Entity not found: id not found"]);
}

#[tokio::test]
async fn test_delete_is_204_even_when_missing() {
    let app = app();
    let created = create(&app, "Books").await;

    for id in [created.id, created.id, 12345] {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_categories_paged_and_sorted() {
    let app = app();
    for name in ["Books", "Toys", "Garden"] {
        create(&app, name).await;
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?page=0&size=2&sort=nameCategory,desc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: Page<Category> = json_body(response.into_body()).await;
    let names: Vec<_> = page.content.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Toys", "Garden"]);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);

    let response = app
        .oneshot(empty_request("GET", "/?sort=colour"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
