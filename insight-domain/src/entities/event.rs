// Event entity
// Represents one visitor or staff occurrence observed by a location camera

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::normalize_timestamp;
use crate::value_objects::{LocationId, VisitorKind};

/// Row as stored in the `traffic_logs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLogRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub location_id: LocationId,
    #[serde(default)]
    pub visitor_type: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl TrafficLogRow {
    /// Returns `None` when the row carries no parseable timestamp.
    pub fn normalize(self) -> Option<TrafficEvent> {
        let timestamp = normalize_timestamp(self.timestamp.as_deref()?)?;
        Some(TrafficEvent {
            id: self.id,
            timestamp,
            location_id: self.location_id,
            visitor_type: self.visitor_type,
            zone_name: self.zone_name,
            duration: self.duration,
            staff_name: self.staff_name,
            response_time: self.response_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficEvent {
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub location_id: LocationId,
    pub visitor_type: Option<String>,
    pub zone_name: Option<String>,
    pub duration: Option<f64>,
    pub staff_name: Option<String>,
    pub response_time: Option<f64>,
}

impl TrafficEvent {
    pub fn kind(&self) -> VisitorKind {
        VisitorKind::from(self.visitor_type.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Ok,
    NoLocations,
    Unavailable,
}

/// Bounded, timestamp-descending slice of a company's events.
#[derive(Debug, Clone)]
pub struct EventWindow {
    pub events: Vec<TrafficEvent>,
    pub status: FetchStatus,
}

impl EventWindow {
    pub fn empty(status: FetchStatus) -> Self {
        Self {
            events: Vec::new(),
            status,
        }
    }
}
