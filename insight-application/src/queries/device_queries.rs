use tracing::warn;

use insight_domain::{DeviceStatus, LocationId};

use crate::dtos::DeviceView;
use crate::queries::dashboard_queries::resolve_scope;
use crate::{AppError, AppState, SessionContext};

/// Picks the requested location (or the configured default) and checks it
/// belongs to the caller's company.
pub async fn resolve_device_location(
    state: &AppState,
    session: &SessionContext,
    requested: Option<i64>,
) -> Result<LocationId, AppError> {
    let location_id = requested
        .map(LocationId)
        .unwrap_or(state.config.device_location_id);
    let scope = resolve_scope(state, session).await?;
    if !scope.contains(&location_id) {
        return Err(AppError::Forbidden(format!(
            "location {} is outside the company scope",
            location_id
        )));
    }
    Ok(location_id)
}

/// Never fails on store trouble: anything but a readable row reports `UNKNOWN`.
pub async fn get_device_status(
    state: &AppState,
    session: &SessionContext,
    requested: Option<i64>,
) -> Result<DeviceView, AppError> {
    let location_id = match resolve_device_location(state, session, requested).await {
        Ok(location_id) => location_id,
        Err(AppError::Forbidden(message)) => return Err(AppError::Forbidden(message)),
        Err(err) => {
            warn!("device scope lookup failed: {}", err);
            return Ok(DeviceView::new(
                requested.map(LocationId).unwrap_or(state.config.device_location_id),
                DeviceStatus::Unknown,
            ));
        }
    };

    let status = read_status(state, location_id).await;
    Ok(DeviceView::new(location_id, status))
}

/// Status of an already scope-checked location; read failures report `UNKNOWN`.
pub async fn read_status(state: &AppState, location_id: LocationId) -> DeviceStatus {
    match state.device_repo.get_status(location_id).await {
        Ok(Some(status)) => status,
        Ok(None) => DeviceStatus::Unknown,
        Err(err) => {
            warn!(location_id = %location_id, kind = err.kind(), "device status read failed: {}", err);
            DeviceStatus::Unknown
        }
    }
}
