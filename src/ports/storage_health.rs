use async_trait::async_trait;

use super::Result;

/// ストレージの死活監視ポート
#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// ストレージに到達できることを確認する
    async fn ping(&self) -> Result<()>;
}
