use crate::domain::{BookId, Borrower, BorrowerId, IdentityFilter};
use crate::ports::borrower_repository::{
    BorrowerRepository as BorrowerRepositoryTrait, HeldBookRemoval,
};
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::map_insert_error;

fn map_row_to_borrower(row: &PgRow) -> Result<Borrower> {
    let book_ids: Vec<Uuid> = row.try_get("book_ids").map_err(StoreError::backend)?;

    Ok(Borrower {
        id: BorrowerId::from_uuid(row.try_get("id").map_err(StoreError::backend)?),
        name: row.try_get("name").map_err(StoreError::backend)?,
        birthday: row.try_get("birthday").map_err(StoreError::backend)?,
        email: row.try_get("email").map_err(StoreError::backend)?,
        book_ids: book_ids.into_iter().map(BookId::from_uuid).collect(),
    })
}

/// BorrowerRepositoryのPostgreSQL実装
///
/// 借りている書籍のリストは`UUID[]`カラム。追加・差し込み・削除はそれぞれ
/// 1文の`UPDATE ... RETURNING`で、更新が取る行ロックが存在確認から
/// 読み戻しまでを覆う。
pub struct BorrowerRepository {
    pool: PgPool,
}

impl BorrowerRepository {
    /// PostgreSQLコネクションプールから新しいBorrowerRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowerRepositoryTrait for BorrowerRepository {
    async fn insert(&self, borrower: Borrower) -> Result<()> {
        let book_ids: Vec<Uuid> = borrower.book_ids.iter().map(BookId::value).collect();

        sqlx::query(
            r#"
            INSERT INTO borrowers (id, name, birthday, email, book_ids)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(borrower.id.value())
        .bind(&borrower.name)
        .bind(borrower.birthday)
        .bind(&borrower.email)
        .bind(book_ids)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, borrower_id: BorrowerId) -> Result<Option<Borrower>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birthday, email, book_ids
            FROM borrowers
            WHERE id = $1
            "#,
        )
        .bind(borrower_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_borrower).transpose()
    }

    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Borrower>> {
        let query = match filter {
            IdentityFilter::NameAndBirthday { name, birthday } => sqlx::query(
                r#"
                SELECT id, name, birthday, email, book_ids
                FROM borrowers
                WHERE name = $1 AND birthday = $2
                "#,
            )
            .bind(name)
            .bind(*birthday),
            IdentityFilter::Email(email) => sqlx::query(
                r#"
                SELECT id, name, birthday, email, book_ids
                FROM borrowers
                WHERE email = $1
                "#,
            )
            .bind(email),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_borrower).transpose()
    }

    async fn append_book(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
    ) -> Result<Option<Borrower>> {
        let row = sqlx::query(
            r#"
            UPDATE borrowers
            SET book_ids = array_append(book_ids, $2)
            WHERE id = $1
            RETURNING id, name, birthday, email, book_ids
            "#,
        )
        .bind(borrower_id.value())
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_borrower).transpose()
    }

    async fn insert_book_at(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
        position: usize,
    ) -> Result<Option<Borrower>> {
        let position = i32::try_from(position).map_err(StoreError::backend)?;

        // 範囲外のスライスは空配列になるので、長さを超える位置は末尾への追加になる
        let row = sqlx::query(
            r#"
            UPDATE borrowers
            SET book_ids = book_ids[:$3::int] || ARRAY[$2::uuid] || book_ids[$3::int + 1:]
            WHERE id = $1
            RETURNING id, name, birthday, email, book_ids
            "#,
        )
        .bind(borrower_id.value())
        .bind(book_id.value())
        .bind(position)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(map_row_to_borrower).transpose()
    }

    async fn remove_book(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
    ) -> Result<HeldBookRemoval> {
        // 削除前の位置は行ロックを取った状態で読む（array_positionは1始まり）
        let row = sqlx::query(
            r#"
            WITH held AS (
                SELECT id, array_position(book_ids, $2) AS held_position
                FROM borrowers
                WHERE id = $1
                FOR UPDATE
            )
            UPDATE borrowers
            SET book_ids = array_remove(borrowers.book_ids, $2)
            FROM held
            WHERE borrowers.id = held.id AND held.held_position IS NOT NULL
            RETURNING borrowers.id, borrowers.name, borrowers.birthday, borrowers.email,
                      borrowers.book_ids, held.held_position
            "#,
        )
        .bind(borrower_id.value())
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        if let Some(row) = row {
            let held_position: i32 = row.try_get("held_position").map_err(StoreError::backend)?;
            let position = usize::try_from(held_position - 1).map_err(StoreError::backend)?;

            return Ok(HeldBookRemoval::Removed {
                borrower: map_row_to_borrower(&row)?,
                position,
            });
        }

        // 何も更新していない。失敗の理由を分けるためだけに読む
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM borrowers WHERE id = $1)")
                .bind(borrower_id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::backend)?;

        if exists {
            Ok(HeldBookRemoval::NotHeld)
        } else {
            Ok(HeldBookRemoval::BorrowerMissing)
        }
    }
}
