use crate::ports::storage_health::StorageHealth as StorageHealthTrait;
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQLの死活監視
///
/// プールから接続を1本借りて`SELECT 1`を実行する。
pub struct StorageHealth {
    pool: PgPool,
}

impl StorageHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageHealthTrait for StorageHealth {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }
}
