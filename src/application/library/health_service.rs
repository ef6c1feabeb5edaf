use std::time::Duration;

use super::ServiceDependencies;
use super::errors::{LibraryError, Result};
use crate::ports::StoreError;

/// 死活監視でストレージの応答を待つ上限
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// ストレージに到達できるか確認する
///
/// 応答が`HEALTH_CHECK_TIMEOUT`以内に返らない場合も到達不能とみなす。
pub async fn check_health(deps: &ServiceDependencies) -> Result<()> {
    match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, deps.storage.ping()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(LibraryError::StorageUnavailable(err)),
        Err(elapsed) => Err(LibraryError::StorageUnavailable(StoreError::backend(elapsed))),
    }
}
