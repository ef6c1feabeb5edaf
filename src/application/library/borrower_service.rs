use crate::domain::{self, Book, BookId, Borrower, BorrowerId, BorrowerRequest, IdentityFilter, UniqueKey};
use crate::ports::{HeldBookRemoval, StoreError};
use std::collections::HashMap;

use super::ServiceDependencies;
use super::errors::{LibraryError, Result};
use super::identity::find_conflict;

fn borrower_conflict(key: UniqueKey) -> LibraryError {
    match key {
        UniqueKey::Email => LibraryError::EmailAlreadyExists,
        UniqueKey::NameAndBirthday | UniqueKey::TitleAndAuthor => {
            LibraryError::BorrowerAlreadyExists
        }
    }
}

/// 借り手を登録する
///
/// 一意性のルールは著者と同じで、著者とは独立に検査する。
pub async fn create_borrower(
    deps: &ServiceDependencies,
    request: BorrowerRequest,
) -> Result<BorrowerId> {
    let borrowers = &deps.borrowers;

    let filters = IdentityFilter::person_keys(&request.name, request.birthday, &request.email);
    let conflict = find_conflict(filters, |filter| async move {
        borrowers.find_one(&filter).await
    })
    .await
    .map_err(LibraryError::IdentityCheckFailed)?;

    if let Some(key) = conflict {
        return Err(borrower_conflict(key));
    }

    let borrower = domain::borrower::register_borrower(request);
    let borrower_id = borrower.id;

    borrowers.insert(borrower).await.map_err(|e| match e {
        StoreError::Conflict(key) => borrower_conflict(key),
        other => LibraryError::BorrowerStoreError(other),
    })?;

    Ok(borrower_id)
}

/// IDで借り手を取得する。存在しない場合は`Ok(None)`。
pub async fn get_borrower(
    deps: &ServiceDependencies,
    borrower_id: BorrowerId,
) -> Result<Option<Borrower>> {
    deps.borrowers
        .find_by_id(borrower_id)
        .await
        .map_err(LibraryError::BorrowerStoreError)
}

/// 借り手のリストに書籍を追加する
///
/// 存在確認と追加は1回の不可分な更新で行う。
/// 更新時点で借り手が存在しなければ`BorrowerNotFound`。
///
/// # 戻り値
/// 更新後の借り手
pub async fn append_borrowed_book(
    deps: &ServiceDependencies,
    borrower_id: BorrowerId,
    book_id: BookId,
) -> Result<Borrower> {
    deps.borrowers
        .append_book(borrower_id, book_id)
        .await
        .map_err(LibraryError::BorrowerStoreError)?
        .ok_or(LibraryError::BorrowerNotFound)
}

/// 借り手のリストから書籍を取り除く
///
/// 存在確認と削除は1回の不可分な更新で行う。
/// 借り手がいなければ`BorrowerNotFound`、その書籍を借りていなければ`BookNotHeld`。
///
/// # 戻り値
/// 更新後の借り手と、取り除いた書籍がリスト上にあった位置
pub async fn remove_borrowed_book(
    deps: &ServiceDependencies,
    borrower_id: BorrowerId,
    book_id: BookId,
) -> Result<(Borrower, usize)> {
    let removal = deps
        .borrowers
        .remove_book(borrower_id, book_id)
        .await
        .map_err(LibraryError::BorrowerStoreError)?;

    match removal {
        HeldBookRemoval::Removed { borrower, position } => Ok((borrower, position)),
        HeldBookRemoval::NotHeld => Err(LibraryError::BookNotHeld),
        HeldBookRemoval::BorrowerMissing => Err(LibraryError::BorrowerNotFound),
    }
}

/// 借り手が借りている書籍を取得する
///
/// 書籍はIDの集合で一括取得し、借りた順に並べ直して返す。
/// 何も借りていない場合は空のリスト。
pub async fn list_borrowed_books(
    deps: &ServiceDependencies,
    borrower_id: BorrowerId,
) -> Result<Vec<Book>> {
    let borrower = get_borrower(deps, borrower_id)
        .await?
        .ok_or(LibraryError::BorrowerNotFound)?;

    if borrower.book_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut books: HashMap<BookId, Book> = deps
        .books
        .find_many(&borrower.book_ids)
        .await
        .map_err(LibraryError::BookStoreError)?
        .into_iter()
        .map(|book| (book.id, book))
        .collect();

    Ok(borrower
        .book_ids
        .iter()
        .filter_map(|book_id| books.remove(book_id))
        .collect())
}
