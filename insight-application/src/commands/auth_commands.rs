use chrono::Utc;
use tracing::{error, info, warn};

use insight_domain::UserProfile;

use crate::crypto::verify_password;
use crate::dtos::{LoginRequest, LoginResponse};
use crate::session::{issue_token, verify_token};
use crate::{AppError, AppState, SessionContext};

pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        state.metrics.record_login(false);
        return Err(AppError::InvalidCredentials);
    }

    let credentials = match state.credential_repo.find_credentials(email).await {
        Ok(credentials) => credentials,
        Err(err) => {
            error!(kind = err.kind(), "credential lookup failed: {}", err);
            state.metrics.record_login(false);
            return Err(AppError::from(err));
        }
    };

    let Some(credentials) = credentials.filter(|row| {
        verify_password(&row.password_salt, &req.password, &row.password_hash)
    }) else {
        warn!("rejected login attempt");
        state.metrics.record_login(false);
        return Err(AppError::InvalidCredentials);
    };

    let profile = UserProfile::from(&credentials);
    let session = SessionContext::new(
        &profile,
        state.config.session_ttl_minutes,
        Utc::now().timestamp_millis(),
    );
    let token = issue_token(&state.config.session_secret, &session)?;
    state.metrics.record_login(true);
    info!(company_id = %session.company_id, session_id = %session.session_id, "login succeeded");

    Ok(LoginResponse {
        token,
        expires_at: session.expires_at,
        user: profile,
    })
}

pub fn authenticate(state: &AppState, token: &str) -> Result<SessionContext, AppError> {
    verify_token(
        &state.config.session_secret,
        token,
        Utc::now().timestamp_millis(),
    )
}
