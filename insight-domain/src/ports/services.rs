use async_trait::async_trait;

use crate::error::StoreError;

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_store(&self) -> Result<bool, StoreError>;
}
