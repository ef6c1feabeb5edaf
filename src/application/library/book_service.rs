use crate::domain::{self, Book, BookId, BookRequest};
use crate::ports::StoreError;

use super::ServiceDependencies;
use super::errors::{LibraryError, Result};

/// 書籍を登録する
///
/// ビジネスルール：
/// - 著者が存在すること
/// - (タイトル, 著者)が既存の書籍と重複しないこと
/// - 登録直後の書籍は貸出可能
///
/// # 戻り値
/// 成功時は採番された書籍ID
pub async fn add_book(deps: &ServiceDependencies, request: BookRequest) -> Result<BookId> {
    // 1. 著者の存在確認
    let author = deps
        .authors
        .find_by_id(request.author_id)
        .await
        .map_err(LibraryError::AuthorStoreError)?;

    if author.is_none() {
        return Err(LibraryError::AuthorNotFound);
    }

    // 2. (タイトル, 著者)の重複確認
    let existing = deps
        .books
        .find_by_title_and_author(&request.title, request.author_id)
        .await
        .map_err(LibraryError::IdentityCheckFailed)?;

    if existing.is_some() {
        return Err(LibraryError::BookAlreadyExists);
    }

    // 3. 生成して挿入
    let book = domain::book::register_book(request);
    let book_id = book.id;

    deps.books.insert(book).await.map_err(|e| match e {
        StoreError::Conflict(_) => LibraryError::BookAlreadyExists,
        other => LibraryError::BookStoreError(other),
    })?;

    Ok(book_id)
}

/// IDで書籍を取得する。存在しない場合は`Ok(None)`。
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Option<Book>> {
    deps.books
        .find_by_id(book_id)
        .await
        .map_err(LibraryError::BookStoreError)
}

/// 全書籍を取得する（フィルタ・ページングなし）
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books
        .list_all()
        .await
        .map_err(LibraryError::BookStoreError)
}

/// 書籍の貸出可否を更新する
///
/// 実際に値が変わった場合に`true`を返す。
/// 書籍が存在しない、または既にその値だった場合は`false`。
pub async fn set_availability(
    deps: &ServiceDependencies,
    book_id: BookId,
    available: bool,
) -> Result<bool> {
    deps.books
        .set_availability(book_id, available)
        .await
        .map_err(LibraryError::BookStoreError)
}
