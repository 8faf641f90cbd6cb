use std::sync::Arc;

use insight_domain::ports::{
    CredentialRepository, DeviceControlRepository, EventRepository, HealthCheckService,
    LocationRepository,
};
use insight_domain::{RuntimeConfig, SummaryOptions};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub credential_repo: Arc<dyn CredentialRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub device_repo: Arc<dyn DeviceControlRepository>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions::new(self.config.histogram_bins, self.config.utc_offset_minutes)
    }
}
