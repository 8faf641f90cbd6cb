use axum::routing::{get, post};
use axum::Router;

use insight_application::AppState;

use crate::handlers::{auth_handlers, control_handlers, dashboard_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/auth/login", post(auth_handlers::login))
        .route("/v1/auth/me", get(auth_handlers::me))
        .route("/v1/dashboard/summary", get(dashboard_handlers::summary))
        .route("/v1/dashboard/activity", get(dashboard_handlers::activity))
        .route("/v1/dashboard/staff", get(dashboard_handlers::staff))
        .route(
            "/v1/control/device",
            get(control_handlers::get_device).put(control_handlers::update_device),
        )
        .route(
            "/v1/control/device/toggle",
            post(control_handlers::toggle_device),
        )
        .route("/v1/control/purge", post(control_handlers::purge))
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
