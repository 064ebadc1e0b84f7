//! Bearer-token gate in front of every admin route.
//! Used by: handlers (via the `AdminClaims` extractor), state.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::console;
use crate::error::{Error, Result};
use crate::state::AppState;
use crate::token::claims::Claims;
use crate::token::AdminTokenService;

const BEARER: &str = "bearer";

pub struct RequestGate {
    tokens: Arc<AdminTokenService>,
}

impl RequestGate {
    pub fn new(tokens: Arc<AdminTokenService>) -> Self {
        Self { tokens }
    }

    /// Returns the verified claims of the request's bearer token.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims> {
        let token = bearer_token(headers)?;
        self.tokens.verify(token)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(Error::MissingToken)?
        .to_str()
        .map_err(|_| Error::MissingToken)?;
    let (scheme, token) = value.split_once(' ').ok_or(Error::MissingToken)?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(Error::MissingToken);
    }
    // Exactly one space after the scheme, no padding around the token.
    if token.is_empty() || token != token.trim() {
        return Err(Error::MissingToken);
    }
    Ok(token)
}

/// Extractor for admin-only handlers; rejects with a uniform 401.
pub struct AdminClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match state.gate.authorize(&parts.headers) {
            Ok(claims) => {
                state.metrics.record_verify();
                Ok(AdminClaims(claims))
            }
            Err(e) => {
                state.metrics.record_rejection(&e);
                tracing::warn!(reason = e.rejection_kind(), path = %parts.uri.path(), "admin request rejected");
                console::log_reject(e.rejection_kind());
                Err(e)
            }
        }
    }
}
