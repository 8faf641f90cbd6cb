use tracing::{error, info};

use insight_domain::{DeviceStatus, LocationId, StoreError};

use crate::dtos::{DeviceUpdateRequest, DeviceView};
use crate::queries::device_queries::{read_status, resolve_device_location};
use crate::{AppError, AppState, SessionContext};

pub async fn set_device_status(
    state: &AppState,
    session: &SessionContext,
    req: DeviceUpdateRequest,
) -> Result<DeviceView, AppError> {
    if req.status == DeviceStatus::Unknown {
        return Err(AppError::BadRequest(
            "status must be START or STOP".to_string(),
        ));
    }
    let location_id = resolve_device_location(state, session, req.location_id).await?;
    apply_status(state, session, location_id, req.status).await
}

/// `START` turns the system off; any other state, including `UNKNOWN`, turns it on.
pub async fn toggle_device(
    state: &AppState,
    session: &SessionContext,
    location_id: Option<i64>,
) -> Result<DeviceView, AppError> {
    let location_id = resolve_device_location(state, session, location_id).await?;
    let current = read_status(state, location_id).await;
    apply_status(state, session, location_id, current.toggled()).await
}

async fn apply_status(
    state: &AppState,
    session: &SessionContext,
    location_id: LocationId,
    status: DeviceStatus,
) -> Result<DeviceView, AppError> {
    match state.device_repo.set_status(location_id, status).await {
        Ok(()) => {
            state.metrics.record_device_change();
            info!(
                location_id = %location_id,
                status = status.as_str(),
                session_id = %session.session_id,
                "device status updated"
            );
            Ok(DeviceView::new(location_id, status))
        }
        Err(StoreError::NotFound) => Err(AppError::NotFound(format!(
            "no device control row for location {}",
            location_id
        ))),
        Err(err) => {
            error!(location_id = %location_id, kind = err.kind(), "device status update failed: {}", err);
            Err(AppError::from(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{session_for, state_with, FakeStore};

    fn store() -> Arc<FakeStore> {
        let store = Arc::new(FakeStore::default());
        store.add_location(1, 10);
        store.add_location(2, 10);
        store.add_location(3, 20);
        store.devices.lock().unwrap().insert(LocationId(1), DeviceStatus::Stop);
        store
    }

    fn update(location_id: Option<i64>, status: DeviceStatus) -> DeviceUpdateRequest {
        DeviceUpdateRequest { location_id, status }
    }

    #[tokio::test]
    async fn toggle_flips_between_start_and_stop() {
        let store = store();
        let state = state_with(store.clone());
        let session = session_for(10, "manager");

        let on = toggle_device(&state, &session, None).await.expect("on");
        assert_eq!(on.status, DeviceStatus::Start);
        let off = toggle_device(&state, &session, None).await.expect("off");
        assert_eq!(off.status, DeviceStatus::Stop);
        assert_eq!(
            store.devices.lock().unwrap().get(&LocationId(1)).copied(),
            Some(DeviceStatus::Stop)
        );
    }

    #[tokio::test]
    async fn unknown_cannot_be_set() {
        let state = state_with(store());
        let result = set_device_status(
            &state,
            &session_for(10, "manager"),
            update(None, DeviceStatus::Unknown),
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_errors_are_reported() {
        let store = store();
        let state = state_with(store.clone());
        let session = session_for(10, "manager");

        let missing = set_device_status(&state, &session, update(Some(2), DeviceStatus::Start)).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let foreign = set_device_status(&state, &session, update(Some(3), DeviceStatus::Start)).await;
        assert!(matches!(foreign, Err(AppError::Forbidden(_))));

        store.set_offline(true);
        let offline = set_device_status(&state, &session, update(None, DeviceStatus::Start)).await;
        assert!(matches!(offline, Err(AppError::Unavailable(_))));
    }
}
