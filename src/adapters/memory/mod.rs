//! インメモリのドキュメントストア
//!
//! コレクションごとにミューテックスで守られたVecを1つ持つ。同じコレクションへの
//! ポート操作は互いに不可分で、一意性の確認は挿入と同じロックの中で行う。

pub mod author_repository;
pub mod book_repository;
pub mod borrower_repository;
pub mod storage_health;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use borrower_repository::BorrowerRepository;
pub use storage_health::StorageHealth;

use crate::ports::StoreError;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("in-memory collection lock poisoned")]
pub struct PoisonedLock;

fn lock<T>(collection: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    collection
        .lock()
        .map_err(|_| StoreError::backend(PoisonedLock))
}
