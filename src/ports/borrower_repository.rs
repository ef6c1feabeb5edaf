use crate::domain::{BookId, Borrower, BorrowerId, IdentityFilter};
use async_trait::async_trait;

use super::Result;

/// 借りている書籍の取り除き結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeldBookRemoval {
    /// 取り除いた。更新後の借り手と、取り除く前のリスト上の位置を持つ
    Removed { borrower: Borrower, position: usize },
    /// 借り手は存在するが、その書籍を借りていない
    NotHeld,
    /// 借り手が存在しない
    BorrowerMissing,
}

/// 借り手コレクションのポート
///
/// 借りている書籍のリストの更新は、存在確認・更新・読み戻しを
/// 1回の不可分な操作で行う（同じ借り手への他の書き込みが割り込まない）。
#[async_trait]
pub trait BorrowerRepository: Send + Sync {
    /// 借り手を1件挿入する
    ///
    /// (名前, 生年月日)またはメールアドレスが既存と衝突すれば`StoreError::Conflict`。
    async fn insert(&self, borrower: Borrower) -> Result<()>;

    /// IDで借り手を取得する。存在しなければ`None`
    async fn find_by_id(&self, borrower_id: BorrowerId) -> Result<Option<Borrower>>;

    /// 一意性キーに一致する借り手を取得する
    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Borrower>>;

    /// 借りている書籍のリストの末尾に書籍を追加する
    ///
    /// 更新後の借り手を返す。更新時点で借り手が存在しなければ`None`。
    async fn append_book(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
    ) -> Result<Option<Borrower>>;

    /// 借りている書籍のリストの`position`番目に書籍を差し込む
    ///
    /// `position`がリストの長さを超える場合は末尾に追加する。
    /// 更新時点で借り手が存在しなければ`None`。
    async fn insert_book_at(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
        position: usize,
    ) -> Result<Option<Borrower>>;

    /// 借りている書籍のリストから書籍を取り除く
    async fn remove_book(&self, borrower_id: BorrowerId, book_id: BookId)
    -> Result<HeldBookRemoval>;
}
