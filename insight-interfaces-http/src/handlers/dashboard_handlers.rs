use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use insight_application::dtos::{ActivityQuery, ActivityView, DashboardView, StaffView};
use insight_application::queries::dashboard_queries;
use insight_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Debug, Default, Deserialize)]
pub struct StaffQuery {
    /// `leaderboard` or `most_active`; both rankings when absent.
    pub order: Option<String>,
}

pub async fn summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardView>, HttpError> {
    let session = authorize(&state, &headers)?;
    Ok(Json(dashboard_queries::load_dashboard(&state, &session).await))
}

pub async fn activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityView>, HttpError> {
    let session = authorize(&state, &headers)?;
    let view = dashboard_queries::list_activity(&state, &session, query).await?;
    Ok(Json(view))
}

pub async fn staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StaffQuery>,
) -> Result<Json<StaffView>, HttpError> {
    let session = authorize(&state, &headers)?;
    let mut view = dashboard_queries::list_staff(&state, &session).await;
    match query.order.as_deref().map(str::trim) {
        None | Some("") => {}
        Some("leaderboard") => view.most_active.clear(),
        Some("most_active") => view.leaderboard.clear(),
        Some(other) => {
            return Err(HttpError::BadRequest(format!("unknown order '{}'", other)));
        }
    }
    Ok(Json(view))
}
