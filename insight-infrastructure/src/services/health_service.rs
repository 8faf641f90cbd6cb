use std::sync::Arc;

use async_trait::async_trait;

use insight_domain::ports::{EventRepository, HealthCheckService};
use insight_domain::StoreError;

pub struct DefaultHealthService {
    event_repo: Arc<dyn EventRepository>,
}

impl DefaultHealthService {
    pub fn new(event_repo: Arc<dyn EventRepository>) -> Self {
        Self { event_repo }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_store(&self) -> Result<bool, StoreError> {
        self.event_repo.ping().await.map(|_| true)
    }
}
