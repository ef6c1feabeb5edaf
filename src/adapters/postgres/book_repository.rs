use crate::domain::{AuthorId, Book, BookId};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use futures::{TryStreamExt, future};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::map_insert_error;

fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: BookId::from_uuid(row.try_get("id").map_err(StoreError::backend)?),
        title: row.try_get("title").map_err(StoreError::backend)?,
        description: row.try_get("description").map_err(StoreError::backend)?,
        author_id: AuthorId::from_uuid(row.try_get("author_id").map_err(StoreError::backend)?),
        genres: row.try_get("genres").map_err(StoreError::backend)?,
        available: row.try_get("available").map_err(StoreError::backend)?,
    })
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, book: Book) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, description, author_id, genres, available)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id.value())
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.author_id.value())
        .bind(&book.genres)
        .bind(book.available)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, author_id, genres, available
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author_id: AuthorId,
    ) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, author_id, genres, available
            FROM books
            WHERE title = $1 AND author_id = $2
            "#,
        )
        .bind(title)
        .bind(author_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_many(&self, book_ids: &[BookId]) -> Result<Vec<Book>> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = book_ids.iter().map(BookId::value).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, author_id, genres, available
            FROM books
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter().map(map_row_to_book).collect()
    }

    /// 全書籍を登録順にストリームで読み出す
    async fn list_all(&self) -> Result<Vec<Book>> {
        sqlx::query(
            r#"
            SELECT id, title, description, author_id, genres, available
            FROM books
            ORDER BY created_at ASC
            "#,
        )
        .fetch(&self.pool)
        .map_err(StoreError::backend)
        .and_then(|row| future::ready(map_row_to_book(&row)))
        .try_collect()
        .await
    }

    async fn set_availability(&self, book_id: BookId, available: bool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available = $2
            WHERE id = $1 AND available <> $2
            "#,
        )
        .bind(book_id.value())
        .bind(available)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(result.rows_affected() == 1)
    }
}
