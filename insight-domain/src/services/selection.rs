use std::collections::BTreeSet;

use crate::entities::TrafficEvent;

/// Drill-down derived from the current chart interaction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// `None` selects guests without a zone.
    Zone(Option<String>),
    Rows(Vec<usize>),
}

impl Selection {
    pub fn is_active(&self) -> bool {
        !matches!(self, Selection::None)
    }
}

pub fn filter_by_zone(guests: &[TrafficEvent], zone: Option<&str>) -> Vec<TrafficEvent> {
    guests
        .iter()
        .filter(|event| event.zone_name.as_deref() == zone)
        .cloned()
        .collect()
}

/// Positions are 0-based into the exact guest sequence the chart was drawn from.
/// Duplicates collapse and out-of-range positions are ignored.
pub fn filter_by_indices(guests: &[TrafficEvent], indices: &[usize]) -> Vec<TrafficEvent> {
    let positions: BTreeSet<usize> = indices
        .iter()
        .copied()
        .filter(|&idx| idx < guests.len())
        .collect();
    positions.into_iter().map(|idx| guests[idx].clone()).collect()
}

pub fn apply_selection(
    guests: &[TrafficEvent],
    selection: &Selection,
    recent_limit: usize,
) -> Vec<TrafficEvent> {
    match selection {
        Selection::None => guests.iter().take(recent_limit).cloned().collect(),
        Selection::Zone(zone) => filter_by_zone(guests, zone.as_deref()),
        Selection::Rows(indices) => filter_by_indices(guests, indices),
    }
}
