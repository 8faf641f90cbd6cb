use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use insight_application::commands::auth_commands;
use insight_application::dtos::{LoginRequest, LoginResponse};
use insight_application::{AppState, SessionContext};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let response = auth_commands::login(&state, payload).await?;
    Ok(Json(response))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionContext>, HttpError> {
    let session = authorize(&state, &headers)?;
    Ok(Json(session))
}
