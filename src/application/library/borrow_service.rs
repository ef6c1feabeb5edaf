use crate::domain::{BookId, Borrower, BorrowerId};

use super::ServiceDependencies;
use super::book_service::{get_book, set_availability};
use super::borrower_service::{append_borrowed_book, get_borrower, remove_borrowed_book};
use super::errors::{LibraryError, Result};

/// 書籍を貸し出す
///
/// 前提条件（失敗した時点で打ち切る）：
/// 1. 書籍が存在すること
/// 2. 借り手が存在すること
/// 3. 書籍が貸出可能であること
///
/// 状態遷移：
/// 4. 書籍を貸出不可にする（条件付き更新。同時貸出で負けた側は`BookNotAvailable`）
/// 5. 借り手のリストに書籍を追加する（不可分な更新）
///
/// # 一貫性保証
///
/// 4と5は別々の書き込みで、両者をまたぐトランザクションは使わない。
/// 5が失敗した場合は4を取り消し（補償）、元のエラーを返す。
/// 取り消しも失敗した場合のみ`CompensationFailed`となり、
/// 書籍が誰にも借りられていないのに貸出不可のまま残る。
///
/// 呼び出し側が4と5の間で処理を打ち切った場合（futureのdrop）も補償は走らない。
///
/// # 戻り値
/// 成功時は更新後の借り手
pub async fn borrow_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    borrower_id: BorrowerId,
) -> Result<Borrower> {
    // 1. 書籍の存在確認
    let book = get_book(deps, book_id)
        .await?
        .ok_or(LibraryError::BookNotFound)?;

    // 2. 借り手の存在確認
    if get_borrower(deps, borrower_id).await?.is_none() {
        return Err(LibraryError::BorrowerNotFound);
    }

    // 3. 貸出可否の確認
    if !book.available {
        return Err(LibraryError::BookNotAvailable);
    }

    // 4. 貸出不可に遷移（3の後に他の貸出が割り込んだ場合はここで弾かれる）
    if !set_availability(deps, book_id, false).await? {
        return Err(LibraryError::BookNotAvailable);
    }

    // 5. 借り手のリストに追加。失敗したら4を取り消す
    match append_borrowed_book(deps, borrower_id, book_id).await {
        Ok(borrower) => {
            tracing::info!(%book_id, %borrower_id, "book borrowed");
            Ok(borrower)
        }
        Err(cause) => Err(revert_availability(deps, book_id, cause).await),
    }
}

/// 書籍を返却する
///
/// 手順：
/// 1. 書籍が存在すること
/// 2. 借り手のリストから書籍を取り除く（不可分な更新。借り手がいない、
///    またはその書籍を借りていなければ失敗）
/// 3. 書籍を貸出可能に戻す
///
/// 3が失敗した場合は2を取り消す（リストの元の位置に戻す）。
pub async fn return_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    borrower_id: BorrowerId,
) -> Result<Borrower> {
    // 1. 書籍の存在確認
    if get_book(deps, book_id).await?.is_none() {
        return Err(LibraryError::BookNotFound);
    }

    // 2. 借り手のリストから取り除く
    let (borrower, position) = remove_borrowed_book(deps, borrower_id, book_id).await?;

    // 3. 貸出可能に戻す。失敗したら2を取り消す
    match set_availability(deps, book_id, true).await {
        Ok(true) => {
            tracing::info!(%book_id, %borrower_id, "book returned");
            Ok(borrower)
        }
        Ok(false) => {
            tracing::warn!(%book_id, %borrower_id, "returned book was already marked available");
            Ok(borrower)
        }
        Err(cause) => Err(restore_held_book(deps, book_id, borrower_id, position, cause).await),
    }
}

/// 貸出の補償：書籍を貸出可能に戻す
async fn revert_availability(
    deps: &ServiceDependencies,
    book_id: BookId,
    cause: LibraryError,
) -> LibraryError {
    tracing::warn!(%book_id, error = %cause, "borrower update failed, reverting availability");

    match deps.books.set_availability(book_id, true).await {
        Ok(_) => cause,
        Err(source) => {
            tracing::error!(%book_id, error = %source, "failed to revert availability");
            LibraryError::CompensationFailed {
                book_id,
                cause: Box::new(cause),
                source: Some(source),
            }
        }
    }
}

/// 返却の補償：借り手のリストの元の位置に書籍を戻す
///
/// 戻す前に借り手が消えていた場合、書籍は貸出不可のまま誰のリストにも
/// 載っていないので`CompensationFailed`になる。
async fn restore_held_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    borrower_id: BorrowerId,
    position: usize,
    cause: LibraryError,
) -> LibraryError {
    tracing::warn!(%book_id, %borrower_id, error = %cause, "availability update failed, restoring held book");

    match deps.borrowers.insert_book_at(borrower_id, book_id, position).await {
        Ok(Some(_)) => cause,
        Ok(None) => {
            tracing::error!(%book_id, %borrower_id, "borrower vanished while restoring held book");
            LibraryError::CompensationFailed {
                book_id,
                cause: Box::new(cause),
                source: None,
            }
        }
        Err(source) => {
            tracing::error!(%book_id, %borrower_id, error = %source, "failed to restore held book");
            LibraryError::CompensationFailed {
                book_id,
                cause: Box::new(cause),
                source: Some(source),
            }
        }
    }
}
