//! Unified error types for the admin gate and back-office API.
//! Used by: token, gate, config, store, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("missing bearer token")]
    MissingToken,

    #[error("malformed token")]
    MalformedToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token expired")]
    TokenExpired,

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    RateLimited(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable label for a rejection, used in logs and telemetry.
    pub fn rejection_kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::MissingToken => "missing",
            Error::MalformedToken => "malformed",
            Error::InvalidSignature => "signature",
            Error::UnsupportedAlgorithm(_) => "algorithm",
            Error::TokenExpired => "expired",
            Error::Decode(_) => "decode",
            Error::InvalidCredentials => "credentials",
            Error::RateLimited(_) => "rate_limited",
            Error::Validation(_) => "validation",
            Error::NotFound(_) => "not_found",
            Error::Database(_) | Error::Serialization(_) | Error::Internal(_) => "internal",
        }
    }

    /// True for every failure of the bearer-token gate.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Error::MissingToken
                | Error::MalformedToken
                | Error::InvalidSignature
                | Error::UnsupportedAlgorithm(_)
                | Error::TokenExpired
                | Error::Decode(_)
        )
    }
}

pub fn lock_err<E: std::fmt::Display>(what: &'static str) -> impl Fn(E) -> Error {
    move |e| Error::Internal(format!("{} lock poisoned: {}", what, e))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Token failures collapse to one response so clients cannot tell which check failed.
        let (status, message) = match &self {
            e if e.is_token_rejection() => (StatusCode::UNAUTHORIZED, "unauthorized".to_owned()),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            _ => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
