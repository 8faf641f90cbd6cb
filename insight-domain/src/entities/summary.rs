// Dashboard summary entities

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Hot-zone label when there are no guest events.
pub const NO_HOT_ZONE: &str = "N/A";
/// Display label for guest events without a zone.
pub const UNASSIGNED_ZONE: &str = "Unassigned";
/// Display label for staff events without a staff name.
pub const UNKNOWN_STAFF: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub visitor_count: usize,
    pub staff_action_count: usize,
    pub avg_engagement: f64,
    pub hot_zone: String,
    pub zone_counts: Vec<ZoneCount>,
    pub engagement_histogram: Vec<HistogramBin>,
    pub hourly_counts: Vec<HourlyCount>,
    pub staff_response_stats: Vec<StaffResponseStats>,
    pub staff_activity_counts: Vec<StaffActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCount {
    pub zone: Option<String>,
    pub count: usize,
}

impl ZoneCount {
    pub fn label(&self) -> &str {
        self.zone.as_deref().unwrap_or(UNASSIGNED_ZONE)
    }
}

/// Serialized with its display label so chart bars can be labelled and drilled into.
impl Serialize for ZoneCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ZoneCount", 3)?;
        state.serialize_field("zone", &self.zone)?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("count", &self.count)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: usize,
}

/// Box-plot distribution of one staff member's response times, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffResponseStats {
    pub staff_name: String,
    pub samples: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffActivity {
    pub staff_name: String,
    pub actions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_count_serializes_label() {
        let unassigned = ZoneCount { zone: None, count: 2 };
        let value = serde_json::to_value(&unassigned).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "zone": null, "label": "Unassigned", "count": 2 })
        );
        let named = ZoneCount { zone: Some("cafe".to_string()), count: 1 };
        assert_eq!(serde_json::to_value(&named).expect("serialize")["label"], "cafe");
    }
}
