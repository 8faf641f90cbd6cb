// Request and response shapes exchanged with the interface layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use insight_domain::{
    DeviceStatus, FetchStatus, LocationId, StaffActivity, StaffResponseStats, Summary,
    TrafficEvent, UserProfile,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub status: FetchStatus,
    pub guest_fingerprint: String,
    pub summary: Summary,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub zone: Option<String>,
    /// Comma-separated 0-based positions from a chart selection.
    pub rows: Option<String>,
    pub fingerprint: Option<String>,
    /// Selects guests without a zone, the chart's "Unassigned" bar.
    #[serde(default)]
    pub unassigned: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionView {
    Recent { limit: usize },
    Zone { zone: Option<String> },
    Rows { rows: Vec<usize> },
}

#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub status: FetchStatus,
    pub guest_fingerprint: String,
    /// False when showing the default recent feed.
    pub filtered: bool,
    pub selection: SelectionView,
    pub rows: Vec<GuestRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GuestRow {
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub visitor_type: Option<String>,
    pub zone_name: Option<String>,
    pub duration: Option<f64>,
}

impl From<&TrafficEvent> for GuestRow {
    fn from(event: &TrafficEvent) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            visitor_type: event.visitor_type.clone(),
            zone_name: event.zone_name.clone(),
            duration: event.duration,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StaffView {
    pub status: FetchStatus,
    pub log: Vec<StaffRow>,
    pub leaderboard: Vec<StaffResponseStats>,
    pub most_active: Vec<StaffActivity>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffRow {
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub staff_name: Option<String>,
    pub zone_name: Option<String>,
    pub response_time: Option<f64>,
}

impl From<&TrafficEvent> for StaffRow {
    fn from(event: &TrafficEvent) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            staff_name: event.staff_name.clone(),
            zone_name: event.zone_name.clone(),
            response_time: event.response_time,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeviceQuery {
    pub location_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceUpdateRequest {
    pub location_id: Option<i64>,
    pub status: DeviceStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceView {
    pub location_id: LocationId,
    pub status: DeviceStatus,
    pub online: bool,
}

impl DeviceView {
    pub fn new(location_id: LocationId, status: DeviceStatus) -> Self {
        Self {
            location_id,
            status,
            online: status.is_online(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PurgeRequest {
    pub pin: String,
}

#[derive(Debug, Serialize)]
pub struct PurgeOutcome {
    pub deleted: u64,
}
