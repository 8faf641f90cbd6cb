use serde::{Deserialize, Serialize};

use crate::value_objects::LocationId;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub event_window_limit: usize,
    pub recent_activity_limit: usize,
    pub staff_log_limit: usize,
    pub histogram_bins: usize,
    pub utc_offset_minutes: i32,
    pub device_location_id: LocationId,
    pub session_secret: String,
    pub session_ttl_minutes: u64,
    pub purge_pin: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgrest,
    Memory,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub store_url: String,
    pub store_api_key: Option<String>,
    pub memory_seed_path: Option<String>,
    pub request_timeout_seconds: u64,
}
