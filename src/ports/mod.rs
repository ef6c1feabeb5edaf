pub mod author_repository;
pub mod book_repository;
pub mod borrower_repository;
pub mod storage_health;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use borrower_repository::{BorrowerRepository, HeldBookRemoval};
pub use storage_health::StorageHealth;

use crate::domain::UniqueKey;
use thiserror::Error;

/// ストレージポート共通のエラー
///
/// 一意制約違反は呼び出し側が重複エラーに変換できるよう、I/Oエラーと区別する。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 一意制約違反
    #[error("unique constraint violated: {0}")]
    Conflict(UniqueKey),

    /// 下位ストレージの障害
    #[error("storage backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
