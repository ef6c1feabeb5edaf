mod author_service;
mod book_service;
mod borrow_service;
mod borrower_service;
mod errors;
mod health_service;
mod identity;

use crate::ports::{AuthorRepository, BookRepository, BorrowerRepository, StorageHealth};
use std::sync::Arc;

pub use author_service::{create_author, get_author};
pub use book_service::{add_book, get_book, list_books, set_availability};
pub use borrow_service::{borrow_book, return_book};
pub use borrower_service::{
    append_borrowed_book, create_borrower, get_borrower, list_borrowed_books, remove_borrowed_book,
};
pub use errors::{ErrorKind, LibraryError, Result};
pub use health_service::{HEALTH_CHECK_TIMEOUT, check_health};

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に明示的に渡される。
/// 貸出・返却はここにある書籍カタログと借り手の2つのポートを順に書き換えるだけで、
/// 自身は状態を持たない。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub borrowers: Arc<dyn BorrowerRepository>,
    pub storage: Arc<dyn StorageHealth>,
}
