use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use insight_domain::{
    apply_selection, classify, most_active_staff, staff_leaderboard, summarize_with,
    EventWindow, FetchStatus, LocationId, Selection, StoreError, TrafficEvent, TrafficLogRow,
};

use crate::crypto::hex_encode;
use crate::dtos::{
    ActivityQuery, ActivityView, DashboardView, GuestRow, SelectionView, StaffRow, StaffView,
};
use crate::{AppError, AppState, SessionContext};

/// Location ids owned by the session's company, sorted and deduplicated.
pub async fn resolve_scope(
    state: &AppState,
    session: &SessionContext,
) -> Result<Vec<LocationId>, StoreError> {
    let mut scope = state
        .location_repo
        .list_location_ids(session.company_id)
        .await?;
    scope.sort();
    scope.dedup();
    Ok(scope)
}

/// Strict accessor: store failures are returned to the caller.
pub async fn load_company_events(
    state: &AppState,
    session: &SessionContext,
) -> Result<EventWindow, StoreError> {
    let scope = resolve_scope(state, session).await?;
    if scope.is_empty() {
        return Ok(EventWindow::empty(FetchStatus::NoLocations));
    }
    let limit = state.config.event_window_limit;
    let rows = state.event_repo.query_events(&scope, limit).await?;
    let events = normalize_rows(state, &scope, rows, limit);
    Ok(EventWindow {
        events,
        status: FetchStatus::Ok,
    })
}

/// Render-path accessor: store failures degrade to an empty `Unavailable` window.
pub async fn fetch_events(state: &AppState, session: &SessionContext) -> EventWindow {
    match load_company_events(state, session).await {
        Ok(window) => {
            if window.status == FetchStatus::NoLocations {
                state.metrics.record_empty_scope();
                info!(company_id = %session.company_id, "company has no locations");
            }
            window
        }
        Err(err) => {
            state.metrics.record_fetch_failure();
            warn!(
                company_id = %session.company_id,
                kind = err.kind(),
                "event fetch failed, serving empty window: {}",
                err
            );
            EventWindow::empty(FetchStatus::Unavailable)
        }
    }
}

pub async fn load_dashboard(state: &AppState, session: &SessionContext) -> DashboardView {
    state.metrics.record_dashboard_request();
    let window = fetch_events(state, session).await;
    let (staff, guests) = classify(window.events);
    let summary = summarize_with(&guests, &staff, &state.summary_options());
    DashboardView {
        status: window.status,
        guest_fingerprint: guest_fingerprint(&guests),
        summary,
    }
}

pub async fn list_activity(
    state: &AppState,
    session: &SessionContext,
    query: ActivityQuery,
) -> Result<ActivityView, AppError> {
    let selection = parse_selection(&query)?;
    let window = fetch_events(state, session).await;
    let (_, guests) = classify(window.events);
    let fingerprint = guest_fingerprint(&guests);

    let expected = query
        .fingerprint
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let (Selection::Rows(_), Some(expected), FetchStatus::Ok) =
        (&selection, expected, window.status)
    {
        if expected != fingerprint {
            return Err(AppError::Conflict(
                "guest rows changed since the chart was drawn".to_string(),
            ));
        }
    }

    let limit = state.config.recent_activity_limit;
    let rows = apply_selection(&guests, &selection, limit);
    Ok(ActivityView {
        status: window.status,
        guest_fingerprint: fingerprint,
        filtered: selection.is_active(),
        selection: selection_view(selection, limit),
        rows: rows.iter().map(GuestRow::from).collect(),
    })
}

pub async fn list_staff(state: &AppState, session: &SessionContext) -> StaffView {
    let window = fetch_events(state, session).await;
    let (staff, _) = classify(window.events);
    StaffView {
        status: window.status,
        log: staff
            .iter()
            .take(state.config.staff_log_limit)
            .map(StaffRow::from)
            .collect(),
        leaderboard: staff_leaderboard(&staff),
        most_active: most_active_staff(&staff),
    }
}

/// Zone values are matched verbatim; only an all-blank value means "no zone".
/// `unassigned` selects guests whose zone is null.
pub fn parse_selection(query: &ActivityQuery) -> Result<Selection, AppError> {
    let zone = query
        .zone
        .as_deref()
        .filter(|value| !value.trim().is_empty());
    let rows = query
        .rows
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let picked = [zone.is_some(), rows.is_some(), query.unassigned]
        .iter()
        .filter(|set| **set)
        .count();
    if picked > 1 {
        return Err(AppError::BadRequest(
            "zone, unassigned and rows cannot be combined".to_string(),
        ));
    }
    if query.unassigned {
        return Ok(Selection::Zone(None));
    }
    match (zone, rows) {
        (Some(zone), _) => Ok(Selection::Zone(Some(zone.to_string()))),
        (None, Some(rows)) => parse_row_indices(rows).map(Selection::Rows),
        (None, None) => Ok(Selection::None),
    }
}

/// SHA-256 over the ordered guest sequence a chart is drawn from.
pub fn guest_fingerprint(guests: &[TrafficEvent]) -> String {
    let mut hasher = Sha256::new();
    for event in guests {
        hasher.update(event.id.unwrap_or(-1).to_le_bytes());
        hasher.update(event.timestamp.timestamp_millis().to_le_bytes());
        hasher.update(event.location_id.0.to_le_bytes());
        hasher.update(event.zone_name.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
    }
    hex_encode(&hasher.finalize())
}

fn parse_row_indices(raw: &str) -> Result<Vec<usize>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<usize>()
                .map_err(|_| AppError::BadRequest(format!("invalid row index '{}'", value)))
        })
        .collect()
}

fn selection_view(selection: Selection, limit: usize) -> SelectionView {
    match selection {
        Selection::None => SelectionView::Recent { limit },
        Selection::Zone(zone) => SelectionView::Zone { zone },
        Selection::Rows(rows) => SelectionView::Rows { rows },
    }
}

fn normalize_rows(
    state: &AppState,
    scope: &[LocationId],
    rows: Vec<TrafficLogRow>,
    limit: usize,
) -> Vec<TrafficEvent> {
    let allowed: HashSet<LocationId> = scope.iter().copied().collect();
    let total = rows.len();
    let mut out_of_scope = 0usize;
    let mut events = Vec::with_capacity(total);
    for row in rows {
        if !allowed.contains(&row.location_id) {
            out_of_scope += 1;
            continue;
        }
        if let Some(event) = row.normalize() {
            events.push(event);
        }
    }
    let unparseable = total - out_of_scope - events.len();
    if out_of_scope > 0 {
        warn!(out_of_scope, "dropped rows outside the company scope");
    }
    if unparseable > 0 {
        warn!(unparseable, "dropped rows without a parseable timestamp");
    }
    state.metrics.record_dropped_rows(out_of_scope + unparseable);

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.truncate(limit);
    events
}
