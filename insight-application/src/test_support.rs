use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use insight_domain::ports::{
    CredentialRepository, DeviceControlRepository, EventRepository, HealthCheckService,
    LocationRepository,
};
use insight_domain::{
    CompanyId, DeviceStatus, LocationId, RuntimeConfig, StoreError, TrafficLogRow,
    UserCredentials,
};

use crate::crypto::hash_password;
use crate::session::SessionContext;
use crate::{AppState, Metrics};

pub const SECRET: &str = "unit-test-secret";

/// Shared in-process table store for application tests.
#[derive(Default)]
pub struct FakeStore {
    pub users: Mutex<Vec<UserCredentials>>,
    pub locations: Mutex<Vec<(LocationId, CompanyId)>>,
    pub events: Mutex<Vec<TrafficLogRow>>,
    pub devices: Mutex<HashMap<LocationId, DeviceStatus>>,
    pub offline: AtomicBool,
    /// Makes `query_events` ignore the location filter, like a misconfigured view.
    pub leaky: AtomicBool,
    pub event_queries: Mutex<usize>,
}

impl FakeStore {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connectivity("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn add_user(&self, email: &str, password: &str, company: i64, role: &str) {
        let salt = format!("salt-{email}");
        let password_hash = hash_password(&salt, password).expect("hash");
        self.users.lock().unwrap().push(UserCredentials {
            email: email.to_string(),
            password_hash,
            password_salt: salt,
            company_id: CompanyId(company),
            name: email.split('@').next().unwrap_or_default().to_string(),
            role: role.to_string(),
        });
    }

    pub fn add_location(&self, location: i64, company: i64) {
        self.locations
            .lock()
            .unwrap()
            .push((LocationId(location), CompanyId(company)));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_event(
        &self,
        id: i64,
        timestamp: &str,
        location: i64,
        visitor_type: &str,
        zone: Option<&str>,
        duration: Option<f64>,
        staff_name: Option<&str>,
        response_time: Option<f64>,
    ) {
        self.events.lock().unwrap().push(TrafficLogRow {
            id: Some(id),
            timestamp: Some(timestamp.to_string()),
            location_id: LocationId(location),
            visitor_type: Some(visitor_type.to_string()),
            zone_name: zone.map(ToString::to_string),
            duration,
            staff_name: staff_name.map(ToString::to_string),
            response_time,
        });
    }

    pub fn event_queries(&self) -> usize {
        *self.event_queries.lock().unwrap()
    }
}

#[async_trait]
impl CredentialRepository for FakeStore {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }
}

#[async_trait]
impl LocationRepository for FakeStore {
    async fn list_location_ids(&self, company_id: CompanyId) -> Result<Vec<LocationId>, StoreError> {
        self.check()?;
        Ok(self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, company)| *company == company_id)
            .map(|(location, _)| *location)
            .collect())
    }
}

#[async_trait]
impl EventRepository for FakeStore {
    async fn query_events(
        &self,
        location_ids: &[LocationId],
        limit: usize,
    ) -> Result<Vec<TrafficLogRow>, StoreError> {
        self.check()?;
        *self.event_queries.lock().unwrap() += 1;
        let mut rows: Vec<TrafficLogRow> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|row| self.leaky.load(Ordering::SeqCst) || location_ids.contains(&row.location_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn delete_events(&self, location_ids: &[LocationId]) -> Result<u64, StoreError> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|row| !location_ids.contains(&row.location_id));
        Ok((before - events.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

#[async_trait]
impl DeviceControlRepository for FakeStore {
    async fn get_status(&self, location_id: LocationId) -> Result<Option<DeviceStatus>, StoreError> {
        self.check()?;
        Ok(self.devices.lock().unwrap().get(&location_id).copied())
    }

    async fn set_status(&self, location_id: LocationId, status: DeviceStatus) -> Result<(), StoreError> {
        self.check()?;
        let mut devices = self.devices.lock().unwrap();
        match devices.get_mut(&location_id) {
            Some(current) => {
                *current = status;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[async_trait]
impl HealthCheckService for FakeStore {
    async fn check_store(&self) -> Result<bool, StoreError> {
        self.ping().await.map(|_| true)
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        event_window_limit: 500,
        recent_activity_limit: 8,
        staff_log_limit: 10,
        histogram_bins: 15,
        utc_offset_minutes: 0,
        device_location_id: LocationId(1),
        session_secret: SECRET.to_string(),
        session_ttl_minutes: 60,
        purge_pin: Some("2030".to_string()),
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 5,
    }
}

pub fn state_with(store: Arc<FakeStore>) -> AppState {
    AppState {
        config: runtime_config(),
        credential_repo: store.clone(),
        location_repo: store.clone(),
        event_repo: store.clone(),
        device_repo: store.clone(),
        health_service: store,
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn session_for(company: i64, role: &str) -> SessionContext {
    SessionContext {
        session_id: uuid::Uuid::new_v4(),
        email: format!("user{company}@athar.example"),
        name: "Test User".to_string(),
        role: role.to_string(),
        company_id: CompanyId(company),
        expires_at: i64::MAX,
    }
}
