use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tokio::sync::RwLock;

use insight_domain::ports::{
    CredentialRepository, DeviceControlRepository, EventRepository, LocationRepository,
};
use insight_domain::{
    normalize_timestamp, CompanyId, DeviceStatus, LocationId, StoreError, TrafficLogRow,
    UserCredentials,
};

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRow {
    pub id: LocationId,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRow {
    pub location_id: LocationId,
    pub status: DeviceStatus,
}

/// JSON seed file layout, one array per table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<UserCredentials>,
    pub locations: Vec<LocationRow>,
    pub events: Vec<TrafficLogRow>,
    pub devices: Vec<DeviceRow>,
}

/// Table store kept in process memory, for demos and local runs.
pub struct MemoryStore {
    users: Vec<UserCredentials>,
    locations: Vec<LocationRow>,
    events: RwLock<Vec<TrafficLogRow>>,
    devices: RwLock<HashMap<LocationId, DeviceStatus>>,
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        let devices = seed
            .devices
            .into_iter()
            .map(|row| (row.location_id, row.status))
            .collect();
        Self {
            users: seed.users,
            locations: seed.locations,
            events: RwLock::new(seed.events),
            devices: RwLock::new(devices),
        }
    }

    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|err| anyhow!("read seed {} failed: {}", path.display(), err))?;
        let seed: SeedData = serde_json::from_str(&content)
            .map_err(|err| anyhow!("parse seed {} failed: {}", path.display(), err))?;
        Ok(Self::new(seed))
    }
}

#[async_trait]
impl CredentialRepository for MemoryStore {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self.users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list_location_ids(&self, company_id: CompanyId) -> Result<Vec<LocationId>, StoreError> {
        Ok(self
            .locations
            .iter()
            .filter(|row| row.company_id == company_id)
            .map(|row| row.id)
            .collect())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn query_events(
        &self,
        location_ids: &[LocationId],
        limit: usize,
    ) -> Result<Vec<TrafficLogRow>, StoreError> {
        let events = self.events.read().await;
        let mut rows: Vec<TrafficLogRow> = events
            .iter()
            .filter(|row| location_ids.contains(&row.location_id))
            .cloned()
            .collect();
        // Missing or unparseable timestamps sort last, matching `order=timestamp.desc.nullslast`.
        rows.sort_by_key(|row| {
            std::cmp::Reverse(row.timestamp.as_deref().and_then(normalize_timestamp))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn delete_events(&self, location_ids: &[LocationId]) -> Result<u64, StoreError> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|row| !location_ids.contains(&row.location_id));
        Ok((before - events.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl DeviceControlRepository for MemoryStore {
    async fn get_status(&self, location_id: LocationId) -> Result<Option<DeviceStatus>, StoreError> {
        Ok(self.devices.read().await.get(&location_id).copied())
    }

    async fn set_status(&self, location_id: LocationId, status: DeviceStatus) -> Result<(), StoreError> {
        let mut devices = self.devices.write().await;
        let current = devices.get_mut(&location_id).ok_or(StoreError::NotFound)?;
        *current = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "users": [{"email": "mona@athar.example", "password_hash": "00", "password_salt": "s", "company_id": 10, "name": "Mona", "role": "admin"}],
        "locations": [{"id": 1, "company_id": 10}, {"id": 2, "company_id": 20}],
        "events": [
            {"id": 1, "timestamp": "2024-05-01 09:00:00", "location_id": 1, "visitor_type": "Guest", "zone_name": "zoneA", "duration": 12.5},
            {"id": 2, "timestamp": "2024-05-01T10:00:00+00:00", "location_id": 1, "visitor_type": "Staff", "staff_name": "alice", "response_time": 3.0},
            {"id": 3, "timestamp": null, "location_id": 1, "visitor_type": "Guest"},
            {"id": 4, "timestamp": "2024-05-01T11:00:00Z", "location_id": 2, "visitor_type": "Guest"}
        ],
        "devices": [{"location_id": 1, "status": "STOP"}]
    }"#;

    fn store() -> MemoryStore {
        MemoryStore::new(serde_json::from_str(SEED).expect("seed"))
    }

    #[tokio::test]
    async fn events_are_scoped_and_newest_first() {
        let store = store();
        let rows = store.query_events(&[LocationId(1)], 10).await.expect("rows");
        let ids: Vec<_> = rows.iter().filter_map(|row| row.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let capped = store.query_events(&[LocationId(1)], 1).await.expect("rows");
        assert_eq!(capped.len(), 1);
    }

    #[tokio::test]
    async fn locations_and_credentials_lookup() {
        let store = store();
        let ids = store.list_location_ids(CompanyId(10)).await.expect("ids");
        assert_eq!(ids, vec![LocationId(1)]);
        assert!(store
            .find_credentials("mona@athar.example")
            .await
            .expect("lookup")
            .is_some());
        assert!(store
            .find_credentials("MONA@athar.example")
            .await
            .expect("lookup")
            .is_none());
    }

    #[tokio::test]
    async fn device_update_requires_existing_row() {
        let store = store();
        store
            .set_status(LocationId(1), DeviceStatus::Start)
            .await
            .expect("update");
        assert_eq!(
            store.get_status(LocationId(1)).await.expect("status"),
            Some(DeviceStatus::Start)
        );
        assert!(matches!(
            store.set_status(LocationId(2), DeviceStatus::Start).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_counts_removed_rows() {
        let store = store();
        assert_eq!(store.delete_events(&[LocationId(1)]).await.expect("delete"), 3);
        assert!(store
            .query_events(&[LocationId(1)], 10)
            .await
            .expect("rows")
            .is_empty());
    }
}
