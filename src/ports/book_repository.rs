use crate::domain::{AuthorId, Book, BookId};
use async_trait::async_trait;

use super::Result;

/// 書籍カタログのポート
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を1件挿入する
    ///
    /// (タイトル, 著者ID)が既存と衝突する場合は`StoreError::Conflict`を返す。
    async fn insert(&self, book: Book) -> Result<()>;

    /// IDで書籍を取得する。存在しない場合は`None`。
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// (タイトル, 著者ID)で書籍を取得する
    async fn find_by_title_and_author(&self, title: &str, author_id: AuthorId)
    -> Result<Option<Book>>;

    /// IDの集合で書籍を一括取得する
    ///
    /// 返却順は保証しない。存在しないIDは単に結果に含まれない。
    async fn find_many(&self, book_ids: &[BookId]) -> Result<Vec<Book>>;

    /// 全書籍を取得する
    async fn list_all(&self) -> Result<Vec<Book>>;

    /// 貸出可否フラグを更新する
    ///
    /// 現在値と異なる場合のみ書き換え、書き換えたかどうかを返す。
    /// 書籍が存在しない場合も`false`。
    /// この条件付き更新により、同じ書籍への同時貸出は片方だけが成功する。
    async fn set_availability(&self, book_id: BookId, available: bool) -> Result<bool>;
}
