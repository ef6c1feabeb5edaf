use crate::domain::{self, Author, AuthorId, AuthorRequest, IdentityFilter, UniqueKey};
use crate::ports::StoreError;

use super::ServiceDependencies;
use super::errors::{LibraryError, Result};
use super::identity::find_conflict;

fn author_conflict(key: UniqueKey) -> LibraryError {
    match key {
        UniqueKey::Email => LibraryError::EmailAlreadyExists,
        UniqueKey::NameAndBirthday | UniqueKey::TitleAndAuthor => LibraryError::AuthorAlreadyExists,
    }
}

/// 著者を登録する
///
/// ビジネスルール：
/// - (名前, 生年月日)が既存の著者と重複しないこと
/// - メールアドレスが既存の著者と重複しないこと
///
/// 2つの事前チェックと挿入は不可分ではないが、同時登録で両方が
/// チェックを通過しても、ストレージの一意制約で片方の挿入が失敗し、
/// 同じ重複エラーになる。
///
/// # 戻り値
/// 成功時は採番された著者ID
pub async fn create_author(deps: &ServiceDependencies, request: AuthorRequest) -> Result<AuthorId> {
    let authors = &deps.authors;

    // 1. (名前, 生年月日) → メールアドレスの順に重複確認
    let filters = IdentityFilter::person_keys(&request.name, request.birthday, &request.email);
    let conflict = find_conflict(filters, |filter| async move {
        authors.find_one(&filter).await
    })
    .await
    .map_err(LibraryError::IdentityCheckFailed)?;

    if let Some(key) = conflict {
        return Err(author_conflict(key));
    }

    // 2. ドメイン層の純粋関数で著者を生成
    let author = domain::author::register_author(request);
    let author_id = author.id;

    // 3. 挿入（一意制約違反は重複エラーとして返す）
    authors.insert(author).await.map_err(|e| match e {
        StoreError::Conflict(key) => author_conflict(key),
        other => LibraryError::AuthorStoreError(other),
    })?;

    Ok(author_id)
}

/// IDで著者を取得する
///
/// 存在しない場合は`Ok(None)`。
pub async fn get_author(deps: &ServiceDependencies, author_id: AuthorId) -> Result<Option<Author>> {
    deps.authors
        .find_by_id(author_id)
        .await
        .map_err(LibraryError::AuthorStoreError)
}
