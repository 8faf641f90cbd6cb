use crate::entities::TrafficEvent;
use crate::value_objects::VisitorKind;

pub fn is_staff(event: &TrafficEvent) -> bool {
    event.kind() == VisitorKind::Staff
}

/// Splits events into `(staff, guests)`, keeping input order within each side.
pub fn classify(events: Vec<TrafficEvent>) -> (Vec<TrafficEvent>, Vec<TrafficEvent>) {
    events.into_iter().partition(is_staff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::LocationId;
    use chrono::{TimeZone, Utc};

    fn event(id: i64, visitor_type: Option<&str>) -> TrafficEvent {
        TrafficEvent {
            id: Some(id),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            location_id: LocationId(1),
            visitor_type: visitor_type.map(ToString::to_string),
            zone_name: None,
            duration: None,
            staff_name: None,
            response_time: None,
        }
    }

    #[test]
    fn staff_marker_is_case_insensitive_substring() {
        for label in ["Staff", "STAFF_interaction", "staff", "Senior staff member"] {
            assert!(is_staff(&event(1, Some(label))), "{label} should be staff");
        }
        for label in [Some("Guest"), Some("Guest_01"), Some(""), None] {
            assert!(!is_staff(&event(1, label)), "{label:?} should be guest");
        }
    }

    #[test]
    fn partition_is_total_disjoint_and_ordered() {
        let events = vec![
            event(1, Some("Guest")),
            event(2, Some("Staff")),
            event(3, None),
            event(4, Some("staff_alert")),
            event(5, Some("Guest_02")),
        ];
        let total = events.len();
        let (staff, guests) = classify(events);
        assert_eq!(staff.len() + guests.len(), total);
        assert!(staff.iter().all(is_staff));
        assert!(guests.iter().all(|e| !is_staff(e)));
        let staff_ids: Vec<_> = staff.iter().filter_map(|e| e.id).collect();
        let guest_ids: Vec<_> = guests.iter().filter_map(|e| e.id).collect();
        assert_eq!(staff_ids, vec![2, 4]);
        assert_eq!(guest_ids, vec![1, 3, 5]);
    }

    #[test]
    fn empty_input_yields_empty_partitions() {
        let (staff, guests) = classify(Vec::new());
        assert!(staff.is_empty());
        assert!(guests.is_empty());
    }
}
