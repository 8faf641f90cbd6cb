use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};
use uuid::Uuid;

use insight_application::{AppState, Metrics};
use insight_domain::ports::{
    CredentialRepository, DeviceControlRepository, EventRepository, LocationRepository,
};
use insight_domain::{StoreBackend, StoreConfig};
use insight_infrastructure::{AppConfig, DefaultHealthService, MemoryStore, PostgrestRepo};

pub struct AppContext {
    pub state: AppState,
}

/// One store object seen through every repository port.
trait TableStore:
    CredentialRepository + LocationRepository + EventRepository + DeviceControlRepository
{
}

impl<T> TableStore for T where
    T: CredentialRepository + LocationRepository + EventRepository + DeviceControlRepository
{
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let mut config = AppConfig::load().await?;
        if config.session_secret.is_none() {
            warn!("session_secret not configured, generated an ephemeral one; sessions end on restart");
            config.session_secret = Some(Uuid::new_v4().simple().to_string());
        }
        if config.purge_pin.is_none() {
            info!("purge_pin not configured, bulk delete is disabled");
        }
        let runtime_config = config.to_runtime_config();
        let store_config = config.to_store_config();

        let state = match store_config.backend {
            StoreBackend::Postgrest => {
                let store = Arc::new(PostgrestRepo::new(&store_config)?);
                info!("using postgrest store at {}", store_config.store_url);
                build_state(runtime_config, store)
            }
            StoreBackend::Memory => {
                let store = Arc::new(load_memory_store(&store_config).await?);
                warn!("using in-memory store, changes are not persisted");
                build_state(runtime_config, store)
            }
        };

        Ok(Self { state })
    }
}

async fn load_memory_store(config: &StoreConfig) -> Result<MemoryStore> {
    let path = config
        .memory_seed_path
        .as_deref()
        .ok_or_else(|| anyhow!("memory_seed_path not configured"))?;
    MemoryStore::from_seed_file(path).await
}

fn build_state<S: TableStore + 'static>(
    config: insight_domain::RuntimeConfig,
    store: Arc<S>,
) -> AppState {
    AppState {
        config,
        credential_repo: store.clone(),
        location_repo: store.clone(),
        event_repo: store.clone(),
        device_repo: store.clone(),
        health_service: Arc::new(DefaultHealthService::new(store)),
        metrics: Arc::new(Metrics::default()),
    }
}
