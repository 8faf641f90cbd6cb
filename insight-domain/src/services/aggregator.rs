use std::collections::{BTreeMap, HashMap};

use chrono::{FixedOffset, Offset, Timelike, Utc};

use crate::entities::{
    HistogramBin, HourlyCount, StaffActivity, StaffResponseStats, Summary, TrafficEvent,
    ZoneCount, NO_HOT_ZONE, UNKNOWN_STAFF,
};

pub const DEFAULT_HISTOGRAM_BINS: usize = 15;

#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub histogram_bins: usize,
    /// Offset used when bucketing timestamps by hour of day.
    pub utc_offset: FixedOffset,
}

impl SummaryOptions {
    pub fn new(histogram_bins: usize, utc_offset_minutes: i32) -> Self {
        let utc_offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self {
            histogram_bins,
            utc_offset,
        }
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            utc_offset: Utc.fix(),
        }
    }
}

pub fn summarize(guests: &[TrafficEvent], staff: &[TrafficEvent]) -> Summary {
    summarize_with(guests, staff, &SummaryOptions::default())
}

pub fn summarize_with(
    guests: &[TrafficEvent],
    staff: &[TrafficEvent],
    options: &SummaryOptions,
) -> Summary {
    let zone_counts = zone_counts(guests);
    // zone_counts is ordered by count, then first occurrence, so its head is the mode
    let hot_zone = zone_counts
        .first()
        .map(|zone| zone.label().to_string())
        .unwrap_or_else(|| NO_HOT_ZONE.to_string());
    let durations = guest_durations(guests);

    Summary {
        visitor_count: guests.len(),
        staff_action_count: staff.len(),
        avg_engagement: mean(&durations).unwrap_or(0.0),
        hot_zone,
        zone_counts,
        engagement_histogram: engagement_histogram(&durations, options.histogram_bins),
        hourly_counts: hourly_counts(guests, options.utc_offset),
        staff_response_stats: staff_leaderboard(staff),
        staff_activity_counts: most_active_staff(staff),
    }
}

/// Guests per zone, most visited first. Ties keep the order zones first appear in.
pub fn zone_counts(guests: &[TrafficEvent]) -> Vec<ZoneCount> {
    let mut counts: Vec<ZoneCount> = Vec::new();
    let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
    for event in guests {
        let zone = event.zone_name.as_deref();
        match positions.get(&zone) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(zone, counts.len());
                counts.push(ZoneCount {
                    zone: zone.map(ToString::to_string),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn engagement_histogram(durations: &[f64], bins: usize) -> Vec<HistogramBin> {
    if durations.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: durations.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|idx| HistogramBin {
            lower: min + width * idx as f64,
            upper: if idx + 1 == bins {
                max
            } else {
                min + width * (idx + 1) as f64
            },
            count: 0,
        })
        .collect();
    for &value in durations {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        histogram[idx].count += 1;
    }
    histogram
}

/// Dense 0..=23 series; hours without guests are zero-filled.
pub fn hourly_counts(guests: &[TrafficEvent], offset: FixedOffset) -> Vec<HourlyCount> {
    let mut hours = [0usize; 24];
    for event in guests {
        let hour = event.timestamp.with_timezone(&offset).hour() as usize;
        hours[hour] += 1;
    }
    hours
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourlyCount {
            hour: hour as u32,
            count,
        })
        .collect()
}

/// Response-time distribution per staff member, fastest mean first.
pub fn staff_leaderboard(staff: &[TrafficEvent]) -> Vec<StaffResponseStats> {
    let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for event in staff {
        let Some(response_time) = event.response_time.filter(|value| value.is_finite()) else {
            continue;
        };
        samples
            .entry(staff_label(event))
            .or_default()
            .push(response_time);
    }

    let mut stats: Vec<StaffResponseStats> = samples
        .into_iter()
        .filter_map(|(staff_name, values)| response_stats(staff_name, values))
        .collect();
    stats.sort_by(|a, b| {
        a.mean
            .total_cmp(&b.mean)
            .then_with(|| a.staff_name.cmp(&b.staff_name))
    });
    stats
}

/// Staff rows per member, busiest first.
pub fn most_active_staff(staff: &[TrafficEvent]) -> Vec<StaffActivity> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for event in staff {
        *counts.entry(staff_label(event)).or_default() += 1;
    }
    let mut activity: Vec<StaffActivity> = counts
        .into_iter()
        .map(|(staff_name, actions)| StaffActivity {
            staff_name,
            actions,
        })
        .collect();
    activity.sort_by(|a, b| {
        b.actions
            .cmp(&a.actions)
            .then_with(|| a.staff_name.cmp(&b.staff_name))
    });
    activity
}

fn guest_durations(guests: &[TrafficEvent]) -> Vec<f64> {
    guests
        .iter()
        .filter_map(|event| event.duration)
        .filter(|value| value.is_finite())
        .collect()
}

fn staff_label(event: &TrafficEvent) -> String {
    event
        .staff_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_STAFF)
        .to_string()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn response_stats(staff_name: String, mut values: Vec<f64>) -> Option<StaffResponseStats> {
    let mean = mean(&values)?;
    values.sort_by(f64::total_cmp);
    Some(StaffResponseStats {
        staff_name,
        samples: values.len(),
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
        mean,
    })
}

// linear interpolation between closest ranks; `sorted` must be non-empty
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}
