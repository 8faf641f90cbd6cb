use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use insight_application::commands::{device_commands, purge_commands};
use insight_application::dtos::{
    DeviceQuery, DeviceUpdateRequest, DeviceView, PurgeOutcome, PurgeRequest,
};
use insight_application::queries::device_queries;
use insight_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<DeviceView>, HttpError> {
    let session = authorize(&state, &headers)?;
    let view = device_queries::get_device_status(&state, &session, query.location_id).await?;
    Ok(Json(view))
}

pub async fn update_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DeviceUpdateRequest>,
) -> Result<Json<DeviceView>, HttpError> {
    let session = authorize(&state, &headers)?;
    let view = device_commands::set_device_status(&state, &session, payload).await?;
    Ok(Json(view))
}

pub async fn toggle_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<DeviceView>, HttpError> {
    let session = authorize(&state, &headers)?;
    let view = device_commands::toggle_device(&state, &session, query.location_id).await?;
    Ok(Json(view))
}

pub async fn purge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PurgeRequest>,
) -> Result<Json<PurgeOutcome>, HttpError> {
    let session = authorize(&state, &headers)?;
    let outcome = purge_commands::purge_events(&state, &session, payload).await?;
    Ok(Json(outcome))
}
