use async_trait::async_trait;

use crate::entities::{TrafficLogRow, UserCredentials};
use crate::error::StoreError;
use crate::value_objects::{CompanyId, DeviceStatus, LocationId};

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list_location_ids(&self, company_id: CompanyId) -> Result<Vec<LocationId>, StoreError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Rows for the given locations, newest first, at most `limit` of them.
    async fn query_events(
        &self,
        location_ids: &[LocationId],
        limit: usize,
    ) -> Result<Vec<TrafficLogRow>, StoreError>;
    async fn delete_events(&self, location_ids: &[LocationId]) -> Result<u64, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DeviceControlRepository: Send + Sync {
    async fn get_status(&self, location_id: LocationId) -> Result<Option<DeviceStatus>, StoreError>;
    async fn set_status(&self, location_id: LocationId, status: DeviceStatus) -> Result<(), StoreError>;
}
