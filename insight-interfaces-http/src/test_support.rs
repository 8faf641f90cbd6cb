use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};

use insight_application::crypto::hash_password;
use insight_application::{AppState, Metrics};
use insight_domain::{
    CompanyId, DeviceStatus, LocationId, RuntimeConfig, TrafficLogRow, UserCredentials,
};
use insight_infrastructure::{DefaultHealthService, DeviceRow, LocationRow, MemoryStore, SeedData};

pub const PASSWORD: &str = "open-sesame";

fn user(email: &str, company: i64, role: &str) -> UserCredentials {
    let salt = format!("salt-{email}");
    UserCredentials {
        email: email.to_string(),
        password_hash: hash_password(&salt, PASSWORD).expect("hash"),
        password_salt: salt,
        company_id: CompanyId(company),
        name: email.to_string(),
        role: role.to_string(),
    }
}

fn event(id: i64, timestamp: &str, location: i64, visitor_type: &str, zone: &str) -> TrafficLogRow {
    let staff = visitor_type.to_ascii_lowercase().contains("staff");
    TrafficLogRow {
        id: Some(id),
        timestamp: Some(timestamp.to_string()),
        location_id: LocationId(location),
        visitor_type: Some(visitor_type.to_string()),
        zone_name: Some(zone.to_string()),
        duration: (!staff).then_some(id as f64 * 10.0),
        staff_name: staff.then(|| "alice".to_string()),
        response_time: staff.then_some(4.0),
    }
}

/// Two companies: 10 owns locations 1 and 2, 20 owns location 3.
pub fn seeded_state() -> AppState {
    let seed = SeedData {
        users: vec![
            user("admin@north.example", 10, "admin"),
            user("viewer@south.example", 20, "viewer"),
        ],
        locations: vec![
            LocationRow { id: LocationId(1), company_id: CompanyId(10) },
            LocationRow { id: LocationId(2), company_id: CompanyId(10) },
            LocationRow { id: LocationId(3), company_id: CompanyId(20) },
        ],
        events: vec![
            event(1, "2024-05-01T09:05:00Z", 1, "Guest", "zoneA"),
            event(2, "2024-05-01T09:40:00Z", 2, "Guest", "zoneA"),
            event(3, "2024-05-01T11:00:00Z", 1, "Staff", "desk"),
            event(4, "2024-05-01T14:10:00Z", 2, "Guest", "zoneB"),
            event(5, "2024-05-01T15:00:00Z", 3, "Guest", "zoneC"),
        ],
        devices: vec![DeviceRow { location_id: LocationId(1), status: DeviceStatus::Stop }],
    };
    let store = Arc::new(MemoryStore::new(seed));
    AppState {
        config: RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            event_window_limit: 500,
            recent_activity_limit: 8,
            staff_log_limit: 10,
            histogram_bins: 15,
            utc_offset_minutes: 0,
            device_location_id: LocationId(1),
            session_secret: "http-test-secret".to_string(),
            session_ttl_minutes: 30,
            purge_pin: Some("2030".to_string()),
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 2,
        },
        credential_repo: store.clone(),
        location_repo: store.clone(),
        event_repo: store.clone(),
        device_repo: store.clone(),
        health_service: Arc::new(DefaultHealthService::new(store)),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
    );
    headers
}
