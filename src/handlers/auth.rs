//! Admin login and token verification endpoints.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::console;
use crate::error::{Error, Result};
use crate::gate::AdminClaims;
use crate::state::AppState;
use crate::token::claims::{Claims, ADMIN_TOKEN_TTL_SECS};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub admin_id: String,
    pub secret_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub claims: Claims,
}

fn validate_request(req: &LoginRequest) -> Result<()> {
    if req.admin_id.is_empty() || req.admin_id.len() > 256 {
        return Err(Error::Validation("adminId must be 1-256 characters".into()));
    }
    if req.admin_id.chars().any(|c| c.is_control()) {
        return Err(Error::Validation("adminId contains control characters".into()));
    }
    if req.secret_key.is_empty() || req.secret_key.len() > 1024 {
        return Err(Error::Validation("secretKey must be 1-1024 characters".into()));
    }
    Ok(())
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    validate_request(&req)?;

    if let Err(e) = state.throttle.check(&req.admin_id) {
        state.metrics.record_throttled();
        console::log_rate_limited(&req.admin_id, &e.to_string());
        return Err(e);
    }

    if !state.credentials.validate(&req.admin_id, &req.secret_key) {
        state.metrics.record_login_failure();
        tracing::warn!(admin_id = %req.admin_id, "admin login rejected");
        console::log_login_failure(&req.admin_id);
        return Err(Error::InvalidCredentials);
    }

    let claims = Claims::admin(req.admin_id, Utc::now().timestamp());
    let token = state.tokens.issue(&claims)?;
    state.metrics.record_login();
    tracing::info!(sub = %claims.sub, exp = claims.exp, "admin token issued");
    console::log_login(&claims.sub);

    Ok(Json(LoginResponse {
        token,
        expires_in: ADMIN_TOKEN_TTL_SECS,
    }))
}

/// Lets a client check a stored token and read back its claims.
pub async fn verify(AdminClaims(claims): AdminClaims) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true, claims })
}
