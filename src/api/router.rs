use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    AppState, add_book, borrow_book, borrowed_books, create_author, create_borrower, get_author,
    get_book, get_borrower, health_check, hello, list_books, return_book,
};

/// プリフライト結果をブラウザがキャッシュしてよい秒数
const CORS_MAX_AGE: Duration = Duration::from_secs(300);

fn is_web_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| origin.starts_with("http://") || origin.starts_with("https://"))
        .unwrap_or(false)
}

/// CORSの設定
///
/// 資格情報付きのリクエストを許可するため、オリジンは`*`ではなく
/// http(s)のオリジンをそのまま返す。
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| is_web_origin(origin)))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

/// 図書館APIの全エンドポイントを持つルーターを作成
///
/// - POST /authors, GET /authors/:id
/// - GET /books, POST /books, GET /books/:id
/// - POST /books/:id/borrow?borrower_id=..., POST /books/:id/return?borrower_id=...
/// - POST /borrowers, GET /borrowers/:id, GET /borrowers/:id/books
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .route("/authors", post(create_author))
        .route("/authors/:id", get(get_author))
        .route("/books", get(list_books).post(add_book))
        .route("/books/:id", get(get_book))
        .route("/books/:id/borrow", post(borrow_book))
        .route("/books/:id/return", post(return_book))
        .route("/borrowers", post(create_borrower))
        .route("/borrowers/:id", get(get_borrower))
        .route("/borrowers/:id/books", get(borrowed_books))
        .layer(cors_layer())
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}
