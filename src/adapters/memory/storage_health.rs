use crate::ports::Result;
use crate::ports::storage_health::StorageHealth as StorageHealthTrait;
use async_trait::async_trait;

/// インメモリストアの死活監視
///
/// プロセス内にあるため常に到達できる。
#[derive(Debug, Default, Clone, Copy)]
pub struct StorageHealth;

#[async_trait]
impl StorageHealthTrait for StorageHealth {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
