use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use insight_domain::{CompanyId, UserProfile};

use crate::crypto::{hex_decode, hex_encode, sign_hmac_sha256, verify_hmac_sha256};
use crate::AppError;

const TOKEN_PREFIX: &str = "insight";
const TOKEN_VERSION: &str = "v1";

/// Authenticated caller, passed explicitly into every pipeline call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub company_id: CompanyId,
    /// Unix millis.
    pub expires_at: i64,
}

impl SessionContext {
    pub fn new(profile: &UserProfile, ttl_minutes: u64, now_ms: i64) -> Self {
        let ttl_ms = i64::try_from(ttl_minutes.saturating_mul(60_000)).unwrap_or(i64::MAX);
        Self {
            session_id: Uuid::new_v4(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            role: profile.role.clone(),
            company_id: profile.company_id,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

/// Token layout: `insight.v1.<hex(json claims)>.<hex(hmac)>`.
pub fn issue_token(secret: &str, session: &SessionContext) -> Result<String, AppError> {
    let claims = serde_json::to_vec(session)
        .map_err(|err| AppError::Internal(anyhow!("serialize session failed: {err}")))?;
    let payload = format!("{}.{}.{}", TOKEN_PREFIX, TOKEN_VERSION, hex_encode(&claims));
    let signature = sign_hmac_sha256(secret, &payload)?;
    Ok(format!("{}.{}", payload, signature))
}

pub fn verify_token(secret: &str, token: &str, now_ms: i64) -> Result<SessionContext, AppError> {
    let (payload, signature) = token
        .trim()
        .rsplit_once('.')
        .ok_or(AppError::Unauthorized)?;
    let mut parts = payload.splitn(3, '.');
    let (Some(prefix), Some(version), Some(encoded)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::Unauthorized);
    };
    if prefix != TOKEN_PREFIX || version != TOKEN_VERSION {
        return Err(AppError::Unauthorized);
    }
    if !verify_hmac_sha256(secret, payload, signature) {
        return Err(AppError::Unauthorized);
    }

    let claims = hex_decode(encoded).ok_or(AppError::Unauthorized)?;
    let session: SessionContext =
        serde_json::from_slice(&claims).map_err(|_| AppError::Unauthorized)?;
    if session.is_expired(now_ms) {
        return Err(AppError::Unauthorized);
    }
    Ok(session)
}
