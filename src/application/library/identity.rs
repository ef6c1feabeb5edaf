use crate::domain::{IdentityFilter, UniqueKey};
use crate::ports::StoreError;
use std::future::Future;

/// 一意性キーごとに既存レコードを検索し、最初に衝突したキーを返す
///
/// 検索は`filters`の順に1件ずつ行い、衝突が見つかった時点で打ち切る。
/// 該当なしは正常な結果（`Ok(None)`）で、検索自体の失敗だけがエラーになる。
///
/// この事前チェックは衝突を名前付きのエラーで返すためのもので、
/// 同時挿入に対する最終的な保証はストレージの一意制約が持つ。
pub(super) async fn find_conflict<T, F, Fut>(
    filters: [IdentityFilter; 2],
    mut lookup: F,
) -> Result<Option<UniqueKey>, StoreError>
where
    F: FnMut(IdentityFilter) -> Fut,
    Fut: Future<Output = Result<Option<T>, StoreError>>,
{
    for filter in filters {
        let key = filter.key();
        if lookup(filter).await?.is_some() {
            return Ok(Some(key));
        }
    }

    Ok(None)
}
