use crate::domain::{Author, AuthorId, IdentityFilter};
use async_trait::async_trait;

use super::Result;

/// 著者コレクションのポート
///
/// 著者は作成後に変更されないため、更新系の操作は持たない。
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// 著者を1件挿入する
    ///
    /// (名前, 生年月日)またはメールアドレスが既存と衝突する場合は
    /// `StoreError::Conflict`を返す。チェックと挿入は不可分に行われる。
    async fn insert(&self, author: Author) -> Result<()>;

    /// IDで著者を取得する。存在しない場合は`None`。
    async fn find_by_id(&self, author_id: AuthorId) -> Result<Option<Author>>;

    /// 一意性キーに一致する著者を1件取得する
    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Author>>;
}
