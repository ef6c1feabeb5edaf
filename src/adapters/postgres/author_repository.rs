use crate::domain::{Author, AuthorId, IdentityFilter};
use crate::ports::author_repository::AuthorRepository as AuthorRepositoryTrait;
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::map_insert_error;

fn map_row_to_author(row: &PgRow) -> Result<Author> {
    Ok(Author {
        id: AuthorId::from_uuid(row.try_get("id").map_err(StoreError::backend)?),
        name: row.try_get("name").map_err(StoreError::backend)?,
        birthday: row.try_get("birthday").map_err(StoreError::backend)?,
        email: row.try_get("email").map_err(StoreError::backend)?,
    })
}

/// AuthorRepositoryのPostgreSQL実装
///
/// 一意性は`authors`テーブルの一意制約で保証する。
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// PostgreSQLコネクションプールから新しいAuthorRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn insert(&self, author: Author) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, birthday, email)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(author.id.value())
        .bind(&author.name)
        .bind(author.birthday)
        .bind(&author.email)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, author_id: AuthorId) -> Result<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birthday, email
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(author_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_author).transpose()
    }

    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Author>> {
        let query = match filter {
            IdentityFilter::NameAndBirthday { name, birthday } => sqlx::query(
                r#"
                SELECT id, name, birthday, email
                FROM authors
                WHERE name = $1 AND birthday = $2
                "#,
            )
            .bind(name)
            .bind(*birthday),
            IdentityFilter::Email(email) => sqlx::query(
                r#"
                SELECT id, name, birthday, email
                FROM authors
                WHERE email = $1
                "#,
            )
            .bind(email),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_author).transpose()
    }
}
