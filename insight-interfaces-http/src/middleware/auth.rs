use axum::http::HeaderMap;

use insight_application::commands::auth_commands;
use insight_application::{AppState, SessionContext};

use crate::error::HttpError;

/// Resolves the bearer token into a session; any failure is a plain 401.
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<SessionContext, HttpError> {
    let token = extract_bearer(headers).ok_or(HttpError::Unauthorized)?;
    auth_commands::authenticate(state, &token).map_err(|_| HttpError::Unauthorized)
}

pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
