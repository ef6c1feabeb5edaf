pub mod author_repository;
pub mod book_repository;
pub mod borrower_repository;
pub mod storage_health;

// パブリックに型を再エクスポート
pub use author_repository::AuthorRepository as PostgresAuthorRepository;
pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrower_repository::BorrowerRepository as PostgresBorrowerRepository;
pub use storage_health::StorageHealth as PostgresStorageHealth;

use crate::domain::UniqueKey;
use crate::ports::StoreError;

/// マイグレーションで付けた一意制約名から衝突したキーを判定する
fn unique_key_for_constraint(constraint: &str) -> Option<UniqueKey> {
    match constraint {
        "authors_name_birthday_key" | "borrowers_name_birthday_key" => {
            Some(UniqueKey::NameAndBirthday)
        }
        "authors_email_key" | "borrowers_email_key" => Some(UniqueKey::Email),
        "books_title_author_id_key" => Some(UniqueKey::TitleAndAuthor),
        _ => None,
    }
}

/// INSERT時のsqlxエラーをStoreErrorに変換する
///
/// 既知の一意制約違反は`Conflict`に、それ以外はすべて`Backend`になる。
fn map_insert_error(err: sqlx::Error) -> StoreError {
    let key = err
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
        .and_then(unique_key_for_constraint);

    match key {
        Some(key) => StoreError::Conflict(key),
        None => StoreError::backend(err),
    }
}
