use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use insight_domain::ports::{
    CredentialRepository, DeviceControlRepository, EventRepository, LocationRepository,
};
use insight_domain::{
    CompanyId, DeviceStatus, LocationId, StoreConfig, StoreError, TrafficLogRow, UserCredentials,
};

use crate::utils::{eq_filter, in_filter, truncate_message};

const USERS_TABLE: &str = "app_users";
const LOCATIONS_TABLE: &str = "locations";
const EVENTS_TABLE: &str = "traffic_logs";
const DEVICE_TABLE: &str = "device_control";

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    status: Option<String>,
}

/// Client for a Supabase-style PostgREST endpoint (`<store_url>/rest/v1/<table>`).
pub struct PostgrestRepo {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PostgrestRepo {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", config.store_url.trim_end_matches('/')),
            api_key: config.store_api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response).await
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .send(self.client.get(self.table_url(table)).query(query))
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl CredentialRepository for PostgrestRepo {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        let rows: Vec<UserCredentials> = self
            .fetch_rows(
                USERS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("email", eq_filter(email)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl LocationRepository for PostgrestRepo {
    async fn list_location_ids(&self, company_id: CompanyId) -> Result<Vec<LocationId>, StoreError> {
        let rows: Vec<IdRow> = self
            .fetch_rows(
                LOCATIONS_TABLE,
                &[
                    ("select", "id".to_string()),
                    ("company_id", eq_filter(company_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| LocationId(row.id)).collect())
    }
}

#[async_trait]
impl EventRepository for PostgrestRepo {
    async fn query_events(
        &self,
        location_ids: &[LocationId],
        limit: usize,
    ) -> Result<Vec<TrafficLogRow>, StoreError> {
        if location_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_rows(EVENTS_TABLE, &event_window_query(location_ids, limit))
            .await
    }

    async fn delete_events(&self, location_ids: &[LocationId]) -> Result<u64, StoreError> {
        if location_ids.is_empty() {
            return Ok(0);
        }
        let request = self
            .client
            .delete(self.table_url(EVENTS_TABLE))
            .header("Prefer", "return=representation")
            .query(&[
                ("location_id", in_filter(location_ids)),
                ("select", "id".to_string()),
            ]);
        let deleted: Vec<IdRow> = decode(self.send(request).await?).await?;
        Ok(deleted.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let _: Vec<IdRow> = self
            .fetch_rows(
                LOCATIONS_TABLE,
                &[("select", "id".to_string()), ("limit", "1".to_string())],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DeviceControlRepository for PostgrestRepo {
    async fn get_status(&self, location_id: LocationId) -> Result<Option<DeviceStatus>, StoreError> {
        let rows: Vec<StatusRow> = self
            .fetch_rows(
                DEVICE_TABLE,
                &[
                    ("select", "status".to_string()),
                    ("location_id", eq_filter(location_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| DeviceStatus::from(row.status.as_deref().unwrap_or_default())))
    }

    async fn set_status(&self, location_id: LocationId, status: DeviceStatus) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url(DEVICE_TABLE))
            .header("Prefer", "return=representation")
            .query(&[
                ("location_id", eq_filter(location_id)),
                ("select", "status".to_string()),
            ])
            .json(&json!({ "status": status.as_str() }));
        let updated: Vec<StatusRow> = decode(self.send(request).await?).await?;
        if updated.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Newest first; NULL timestamps go last so they never take window slots.
fn event_window_query(location_ids: &[LocationId], limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("location_id", in_filter(location_ids)),
        ("order", "timestamp.desc.nullslast".to_string()),
        ("limit", limit.to_string()),
    ]
}

fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Connectivity(err.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(map_status(status, &body))
}

fn map_status(status: StatusCode, body: &str) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        other => StoreError::Backend {
            status: other.as_u16(),
            message: truncate_message(body, 200),
        },
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, StoreError> {
    let body = response.bytes().await.map_err(map_transport_error)?;
    serde_json::from_slice(&body).map_err(|err| StoreError::Decode(err.to_string()))
}
