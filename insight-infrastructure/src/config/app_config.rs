use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use insight_domain::{LocationId, RuntimeConfig, StoreBackend, StoreConfig};

use super::validation::{validate_base_url, validate_utc_offset_minutes};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub store_url: String,
    pub store_api_key: Option<String>,
    pub memory_seed_path: Option<String>,
    pub event_window_limit: usize,
    pub recent_activity_limit: usize,
    pub staff_log_limit: usize,
    pub histogram_bins: usize,
    pub utc_offset_minutes: i32,
    pub device_location_id: i64,
    pub session_secret: Option<String>,
    pub session_ttl_minutes: u64,
    pub purge_pin: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            store_backend: StoreBackend::Postgrest,
            store_url: "http://127.0.0.1:54321".to_string(),
            store_api_key: None,
            memory_seed_path: None,
            event_window_limit: 500,
            recent_activity_limit: 8,
            staff_log_limit: 10,
            histogram_bins: 15,
            utc_offset_minutes: 0,
            device_location_id: 1,
            session_secret: None,
            session_ttl_minutes: 12 * 60,
            purge_pin: None,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("INSIGHT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::parse(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(file_path.parent());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    /// Blank optional values count as unset.
    pub fn normalize(&mut self) {
        self.store_url = self.store_url.trim().trim_end_matches('/').to_string();
        blank_to_none(&mut self.store_api_key);
        blank_to_none(&mut self.memory_seed_path);
        blank_to_none(&mut self.session_secret);
        blank_to_none(&mut self.purge_pin);
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(seed) = &self.memory_seed_path {
            self.memory_seed_path = Some(resolve_path(base, seed));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        match self.store_backend {
            StoreBackend::Postgrest => validate_base_url("store_url", &self.store_url)?,
            StoreBackend::Memory => {
                if self.memory_seed_path.is_none() {
                    return Err(anyhow!("memory_seed_path is required for the memory backend"));
                }
            }
        }
        if self.event_window_limit == 0 {
            return Err(anyhow!("event_window_limit must be greater than 0"));
        }
        if self.recent_activity_limit == 0 || self.staff_log_limit == 0 {
            return Err(anyhow!("recent_activity_limit and staff_log_limit must be greater than 0"));
        }
        if self.histogram_bins == 0 {
            return Err(anyhow!("histogram_bins must be greater than 0"));
        }
        validate_utc_offset_minutes(self.utc_offset_minutes)?;
        if self.session_ttl_minutes == 0 {
            return Err(anyhow!("session_ttl_minutes must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            event_window_limit: self.event_window_limit,
            recent_activity_limit: self.recent_activity_limit,
            staff_log_limit: self.staff_log_limit,
            histogram_bins: self.histogram_bins,
            utc_offset_minutes: self.utc_offset_minutes,
            device_location_id: LocationId(self.device_location_id),
            session_secret: self.session_secret.clone().unwrap_or_default(),
            session_ttl_minutes: self.session_ttl_minutes,
            purge_pin: self.purge_pin.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store_backend,
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            memory_seed_path: self.memory_seed_path.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("INSIGHT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("INSIGHT_STORE_BACKEND") {
            match value.trim().to_ascii_lowercase().as_str() {
                "postgrest" => self.store_backend = StoreBackend::Postgrest,
                "memory" => self.store_backend = StoreBackend::Memory,
                other => warn!("ignoring unknown INSIGHT_STORE_BACKEND '{}'", other),
            }
        }
        if let Ok(value) = env::var("INSIGHT_STORE_URL") {
            self.store_url = value;
        }
        if let Ok(value) = env::var("INSIGHT_STORE_API_KEY") {
            self.store_api_key = Some(value);
        }
        if let Ok(value) = env::var("INSIGHT_MEMORY_SEED_PATH") {
            self.memory_seed_path = Some(value);
        }
        if let Ok(value) = env::var("INSIGHT_SESSION_SECRET") {
            self.session_secret = Some(value);
        }
        if let Ok(value) = env::var("INSIGHT_PURGE_PIN") {
            self.purge_pin = Some(value);
        }
        override_parsed("INSIGHT_EVENT_WINDOW_LIMIT", &mut self.event_window_limit);
        override_parsed("INSIGHT_RECENT_ACTIVITY_LIMIT", &mut self.recent_activity_limit);
        override_parsed("INSIGHT_STAFF_LOG_LIMIT", &mut self.staff_log_limit);
        override_parsed("INSIGHT_HISTOGRAM_BINS", &mut self.histogram_bins);
        override_parsed("INSIGHT_UTC_OFFSET_MINUTES", &mut self.utc_offset_minutes);
        override_parsed("INSIGHT_DEVICE_LOCATION_ID", &mut self.device_location_id);
        override_parsed("INSIGHT_SESSION_TTL_MINUTES", &mut self.session_ttl_minutes);
        override_parsed("INSIGHT_MAX_BODY_BYTES", &mut self.max_body_bytes);
        override_parsed("INSIGHT_REQUEST_TIMEOUT_SECONDS", &mut self.request_timeout_seconds);
    }
}

fn override_parsed<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(value) = env::var(key) {
        match value.trim().parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!("ignoring unparseable {}='{}'", key, value),
        }
    }
}

fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|inner| inner.trim().is_empty()) {
        *value = None;
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
