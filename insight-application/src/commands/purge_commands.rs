use tracing::{error, warn};

use crate::crypto::secrets_match;
use crate::dtos::{PurgeOutcome, PurgeRequest};
use crate::queries::dashboard_queries::resolve_scope;
use crate::{AppError, AppState, SessionContext};

/// Deletes every event of the caller's company. Disabled unless a PIN is configured.
pub async fn purge_events(
    state: &AppState,
    session: &SessionContext,
    req: PurgeRequest,
) -> Result<PurgeOutcome, AppError> {
    let Some(expected) = state.config.purge_pin.as_deref() else {
        return Err(AppError::Forbidden("purge is disabled".to_string()));
    };
    if !secrets_match(expected, req.pin.trim()) {
        warn!(session_id = %session.session_id, "purge rejected: wrong pin");
        return Err(AppError::Forbidden("invalid pin".to_string()));
    }

    let scope = resolve_scope(state, session).await?;
    if scope.is_empty() {
        return Ok(PurgeOutcome { deleted: 0 });
    }

    let deleted = state.event_repo.delete_events(&scope).await.map_err(|err| {
        error!(kind = err.kind(), "purge failed: {}", err);
        AppError::from(err)
    })?;
    state.metrics.record_purge();
    warn!(
        company_id = %session.company_id,
        deleted,
        "purged company events"
    );
    Ok(PurgeOutcome { deleted })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{session_for, state_with, FakeStore};

    fn store() -> Arc<FakeStore> {
        let store = Arc::new(FakeStore::default());
        store.add_location(1, 10);
        store.add_location(3, 20);
        store.add_event(1, "2024-05-01T09:00:00Z", 1, "Guest", Some("zoneA"), Some(4.0), None, None);
        store.add_event(2, "2024-05-01T10:00:00Z", 1, "Staff", None, None, Some("alice"), Some(2.0));
        store.add_event(3, "2024-05-01T10:00:00Z", 3, "Guest", Some("zoneC"), Some(9.0), None, None);
        store
    }

    fn pin(value: &str) -> PurgeRequest {
        PurgeRequest {
            pin: value.to_string(),
        }
    }

    #[tokio::test]
    async fn purge_only_touches_own_company() {
        let store = store();
        let state = state_with(store.clone());
        let outcome = purge_events(&state, &session_for(10, "admin"), pin("2030"))
            .await
            .expect("purge");
        assert_eq!(outcome.deleted, 2);
        let remaining = store.events.lock().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, Some(3));
    }

    #[tokio::test]
    async fn wrong_or_unconfigured_pin_is_forbidden() {
        let store = store();
        let mut state = state_with(store.clone());
        let wrong = purge_events(&state, &session_for(10, "admin"), pin("0000")).await;
        assert!(matches!(wrong, Err(AppError::Forbidden(_))));

        state.config.purge_pin = None;
        let disabled = purge_events(&state, &session_for(10, "admin"), pin("2030")).await;
        assert!(matches!(disabled, Err(AppError::Forbidden(_))));
        assert_eq!(store.events.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_scope_deletes_nothing() {
        let state = state_with(store());
        let outcome = purge_events(&state, &session_for(99, "admin"), pin("2030"))
            .await
            .expect("purge");
        assert_eq!(outcome.deleted, 0);
    }
}
