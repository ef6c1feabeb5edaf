use crate::application::library::{self, ServiceDependencies};
use crate::domain::{Author, AuthorId, AuthorRequest, Book, BookId, BookRequest, Borrower, BorrowerId, BorrowerRequest};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::JsonBody,
    types::{BorrowerQuery, CreatedResponse, MessageResponse},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Authors
// ============================================================================

/// POST /authors - 著者を登録
///
/// (名前, 生年月日)とメールアドレスがそれぞれ既存の著者と重複しないこと。
pub async fn create_author(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<AuthorRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let author_id = library::create_author(&state.service_deps, req).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(author_id))))
}

/// GET /authors/:id - 著者をIDで取得
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    let author_id: AuthorId = author_id.parse().map_err(ApiError::invalid_id("author_id"))?;

    library::get_author(&state.service_deps, author_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("no author with this ID"))
}

// ============================================================================
// Books
// ============================================================================

/// GET /books - 全書籍を取得
pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = library::list_books(&state.service_deps).await?;

    Ok(Json(books))
}

/// POST /books - 書籍を登録
///
/// 著者が存在し、(タイトル, 著者)が重複しないこと。登録直後は貸出可能。
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BookRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let book_id = library::add_book(&state.service_deps, req).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(book_id))))
}

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book_id: BookId = book_id.parse().map_err(ApiError::invalid_id("book_id"))?;

    library::get_book(&state.service_deps, book_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("no book with this ID"))
}

/// POST /books/:id/borrow?borrower_id=... - 書籍を貸し出す
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Query(query): Query<BorrowerQuery>,
) -> Result<StatusCode, ApiError> {
    let book_id: BookId = book_id.parse().map_err(ApiError::invalid_id("book_id"))?;
    let borrower_id: BorrowerId = query
        .borrower_id
        .parse()
        .map_err(ApiError::invalid_id("borrower_id"))?;

    library::borrow_book(&state.service_deps, book_id, borrower_id).await?;

    Ok(StatusCode::OK)
}

/// POST /books/:id/return?borrower_id=... - 書籍を返却する
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Query(query): Query<BorrowerQuery>,
) -> Result<StatusCode, ApiError> {
    let book_id: BookId = book_id.parse().map_err(ApiError::invalid_id("book_id"))?;
    let borrower_id: BorrowerId = query
        .borrower_id
        .parse()
        .map_err(ApiError::invalid_id("borrower_id"))?;

    library::return_book(&state.service_deps, book_id, borrower_id).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Borrowers
// ============================================================================

/// POST /borrowers - 借り手を登録
pub async fn create_borrower(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BorrowerRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let borrower_id = library::create_borrower(&state.service_deps, req).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(borrower_id))))
}

/// GET /borrowers/:id - 借り手をIDで取得
pub async fn get_borrower(
    State(state): State<Arc<AppState>>,
    Path(borrower_id): Path<String>,
) -> Result<Json<Borrower>, ApiError> {
    let borrower_id: BorrowerId = borrower_id
        .parse()
        .map_err(ApiError::invalid_id("borrower_id"))?;

    library::get_borrower(&state.service_deps, borrower_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("no borrower with this ID"))
}

/// GET /borrowers/:id/books - 借り手が借りている書籍を取得
pub async fn borrowed_books(
    State(state): State<Arc<AppState>>,
    Path(borrower_id): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let borrower_id: BorrowerId = borrower_id
        .parse()
        .map_err(ApiError::invalid_id("borrower_id"))?;

    let books = library::list_borrowed_books(&state.service_deps, borrower_id).await?;

    Ok(Json(books))
}

// ============================================================================
// Misc
// ============================================================================

/// GET /
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}

/// GET /health - ストレージに到達できるか確認
///
/// 到達できなければ503。
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    library::check_health(&state.service_deps).await?;

    Ok(Json(MessageResponse::new("It's healthy")))
}
