mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use library_backend::api::handlers::AppState;
use library_backend::api::router::create_router;
use library_backend::api::types::*;
use library_backend::application::library::ServiceDependencies;
use library_backend::domain::{Book, Borrower};
use library_backend::ports::{self, StorageHealth, StoreError};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// ヘルパー関数
// ============================================================================

fn setup_app() -> axum::Router {
    app_with(common::memory_deps())
}

fn app_with(service_deps: ServiceDependencies) -> axum::Router {
    create_router(Arc::new(AppState { service_deps }))
}

/// 常に到達できないストレージ
struct UnreachableStorage;

#[async_trait]
impl StorageHealth for UnreachableStorage {
    async fn ping(&self) -> ports::Result<()> {
        Err(StoreError::backend(std::io::Error::other("connection refused")))
    }
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn create(app: &axum::Router, uri: &str, body: Value) -> String {
    let (status, bytes) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    parse::<CreatedResponse>(&bytes).id
}

fn bober_author() -> Value {
    json!({
        "name": "Bober",
        "birthday": "1996-05-17",
        "email": "bober@author.com",
    })
}

fn bober_borrower() -> Value {
    json!({
        "name": "Bober",
        "birthday": "1996-05-17",
        "email": "bober@hotmail.com",
    })
}

fn hobbit(author_id: &str) -> Value {
    json!({
        "title": "Hobbit",
        "description": "The Hobbit is set in Middle-earth",
        "author_id": author_id,
        "genres": ["fantasy"],
        "available": true,
    })
}

// ============================================================================
// 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_health_and_hello() {
    let app = setup_app();

    let (status, bytes) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<MessageResponse>(&bytes).message, "It's healthy");

    let (status, bytes) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<MessageResponse>(&bytes).message, "Hello World");
}

#[tokio::test]
async fn test_author_create_and_get() {
    let app = setup_app();

    let author_id = create(&app, "/authors", bober_author()).await;
    assert_eq!(author_id.len(), 32);

    let (status, bytes) = send(&app, "GET", &format!("/authors/{}", author_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let author: Value = parse(&bytes);
    assert_eq!(author["id"], author_id);
    assert_eq!(author["name"], "Bober");
    assert_eq!(author["birthday"], "1996-05-17");
    assert_eq!(author["email"], "bober@author.com");
}

#[tokio::test]
async fn test_list_books_returns_created_book() {
    let app = setup_app();
    let author_id = create(&app, "/authors", bober_author()).await;
    let book_id = create(&app, "/books", hobbit(&author_id)).await;

    let (status, bytes) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);

    let books: Vec<Book> = parse(&bytes);
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id.to_string(), book_id);
    assert_eq!(books[0].title, "Hobbit");
    assert_eq!(books[0].author_id.to_string(), author_id);
    assert_eq!(books[0].genres, vec!["fantasy".to_string()]);
    assert!(books[0].available);
}

#[tokio::test]
async fn test_full_borrow_and_return_flow() {
    let app = setup_app();
    let borrower_id = create(&app, "/borrowers", bober_borrower()).await;
    let author_id = create(&app, "/authors", bober_author()).await;
    let book_id = create(&app, "/books", hobbit(&author_id)).await;

    // 貸出
    let (status, _) = send(
        &app,
        "POST",
        &format!("/books/{}/borrow?borrower_id={}", book_id, borrower_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, bytes) = send(&app, "GET", &format!("/books/{}", book_id), None).await;
    assert!(!parse::<Book>(&bytes).available);

    let (status, bytes) = send(&app, "GET", &format!("/borrowers/{}/books", borrower_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let borrowed: Vec<Book> = parse(&bytes);
    assert_eq!(borrowed.len(), 1);
    assert_eq!(borrowed[0].id.to_string(), book_id);

    let (_, bytes) = send(&app, "GET", &format!("/borrowers/{}", borrower_id), None).await;
    let borrower: Borrower = parse(&bytes);
    assert_eq!(borrower.book_ids.len(), 1);

    // 2回目の貸出は400
    let (status, bytes) = send(
        &app,
        "POST",
        &format!("/books/{}/borrow?borrower_id={}", book_id, borrower_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&bytes).message, "book isn't available");

    // 返却
    let (status, _) = send(
        &app,
        "POST",
        &format!("/books/{}/return?borrower_id={}", book_id, borrower_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, bytes) = send(&app, "GET", &format!("/borrowers/{}/books", borrower_id), None).await;
    assert!(parse::<Vec<Book>>(&bytes).is_empty());
}

// ============================================================================
// エラー系
// ============================================================================

#[tokio::test]
async fn test_health_reports_unreachable_storage() {
    let app = app_with(ServiceDependencies {
        storage: Arc::new(UnreachableStorage),
        ..common::memory_deps()
    });

    let (status, bytes) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let body: ErrorResponse = parse(&bytes);
    assert_eq!(body.error, "SERVICE_UNAVAILABLE");
    assert_eq!(body.message, "storage is unreachable");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_request() {
    let app = setup_app();

    let testcases = [
        (
            "/books",
            hobbit("67e55044-10b1-426f-9247-bb680e5fe0c8"),
        ),
        (
            "/authors",
            json!({"name": "Bober", "birthday": "17/05/1996", "email": "bober@author.com"}),
        ),
        (
            "/borrowers",
            json!({"name": "Bober", "email": "bober@hotmail.com"}),
        ),
    ];

    for (uri, body) in testcases {
        let (status, bytes) = send(&app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "POST {}", uri);
        assert_eq!(parse::<ErrorResponse>(&bytes).error, "INVALID_BODY");
    }
}

#[tokio::test]
async fn test_birthday_reads_back_as_submitted() {
    let app = setup_app();

    let (status, _) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({"name": "Bober", "birthday": "1996-5-7", "email": "bober@author.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let author_id = create(
        &app,
        "/authors",
        json!({"name": "Bober", "birthday": "1996-05-07", "email": "bober@author.com"}),
    )
    .await;
    let (_, bytes) = send(&app, "GET", &format!("/authors/{}", author_id), None).await;
    assert_eq!(parse::<Value>(&bytes)["birthday"], "1996-05-07");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = setup_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/books")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "300");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST") && methods.contains("PATCH"));
}

#[tokio::test]
async fn test_cors_ignores_non_web_origins() {
    let app = setup_app();

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(header::ORIGIN, "null")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn test_duplicate_author_is_bad_request() {
    let app = setup_app();
    create(&app, "/authors", bober_author()).await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({
            "name": "Skunks",
            "birthday": "1996-05-17",
            "email": "bober@author.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&bytes).message, "email already exists");
}

#[tokio::test]
async fn test_book_with_unknown_author_is_bad_request() {
    let app = setup_app();

    let (status, bytes) = send(
        &app,
        "POST",
        "/books",
        Some(hobbit("67e5504410b1426f9247bb680e5fe0c8")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&bytes).message, "author doesn't exists");
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = setup_app();
    let unknown = "67e5504410b1426f9247bb680e5fe0c8";

    for uri in [
        format!("/authors/{}", unknown),
        format!("/books/{}", unknown),
        format!("/borrowers/{}", unknown),
        format!("/borrowers/{}/books", unknown),
    ] {
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let borrower_id = create(&app, "/borrowers", bober_borrower()).await;
    let (status, bytes) = send(
        &app,
        "POST",
        &format!("/books/{}/borrow?borrower_id={}", unknown, borrower_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&bytes).message, "book doesn't exist");
}

#[tokio::test]
async fn test_non_canonical_ids_are_rejected() {
    let app = setup_app();

    let (status, bytes) = send(
        &app,
        "GET",
        "/authors/67e55044-10b1-426f-9247-bb680e5fe0c8",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&bytes).error, "INVALID_ID");

    let (status, _) = send(
        &app,
        "POST",
        "/books/67e5504410b1426f9247bb680e5fe0c8/borrow?borrower_id=not-an-id",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
