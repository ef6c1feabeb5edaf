use crate::domain::{AuthorId, Book, BookId, UniqueKey};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;

/// BookRepositoryのインメモリ実装
///
/// 登録順を保持するため、一覧は挿入順で返る。
#[derive(Default)]
pub struct BookRepository {
    books: Mutex<Vec<Book>>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, book: Book) -> Result<()> {
        let mut books = lock(&self.books)?;

        if books
            .iter()
            .any(|b| b.title == book.title && b.author_id == book.author_id)
        {
            return Err(StoreError::Conflict(UniqueKey::TitleAndAuthor));
        }

        books.push(book);
        Ok(())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let books = lock(&self.books)?;
        Ok(books.iter().find(|b| b.id == book_id).cloned())
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author_id: AuthorId,
    ) -> Result<Option<Book>> {
        let books = lock(&self.books)?;
        Ok(books
            .iter()
            .find(|b| b.title == title && b.author_id == author_id)
            .cloned())
    }

    async fn find_many(&self, book_ids: &[BookId]) -> Result<Vec<Book>> {
        let books = lock(&self.books)?;
        Ok(books
            .iter()
            .filter(|b| book_ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        let books = lock(&self.books)?;
        Ok(books.clone())
    }

    async fn set_availability(&self, book_id: BookId, available: bool) -> Result<bool> {
        let mut books = lock(&self.books)?;

        match books.iter_mut().find(|b| b.id == book_id) {
            Some(book) if book.available != available => {
                book.available = available;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
