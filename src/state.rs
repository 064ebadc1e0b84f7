//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::credentials::{CredentialValidator, StaticCredentials};
use crate::error::Result;
use crate::gate::RequestGate;
use crate::store::sqlite::SqliteStore;
use crate::store::DataStore;
use crate::telemetry::Metrics;
use crate::throttle::{LoginThrottle, ThrottleConfig};
use crate::token::AdminTokenService;

pub struct AppStateInner {
    pub tokens: Arc<AdminTokenService>,
    pub gate: RequestGate,
    pub credentials: Box<dyn CredentialValidator>,
    pub store: Box<dyn DataStore>,
    pub throttle: LoginThrottle,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

struct StateBuilder {
    tokens: AdminTokenService,
    credentials: Box<dyn CredentialValidator>,
    store: Box<dyn DataStore>,
    throttle: ThrottleConfig,
}

impl StateBuilder {
    fn build(self) -> AppState {
        let tokens = Arc::new(self.tokens);
        Arc::new(AppStateInner {
            gate: RequestGate::new(tokens.clone()),
            tokens,
            credentials: self.credentials,
            store: self.store,
            throttle: LoginThrottle::new(self.throttle),
            metrics: Metrics::new(),
        })
    }
}

/// Fails before anything is served if the token secret is unusable.
pub fn build_state(config: &Config) -> Result<AppState> {
    Ok(StateBuilder {
        tokens: AdminTokenService::new(&config.token_secret)?,
        credentials: Box::new(StaticCredentials::new(
            config.admin_id.clone(),
            config.admin_secret_key.clone(),
        )),
        store: Box::new(SqliteStore::open(&config.database_path)?),
        throttle: ThrottleConfig::default(),
    }
    .build())
}

#[cfg(test)]
pub fn build_test_state(secret: &str, admin_id: &str, secret_key: &str) -> Result<AppState> {
    Ok(StateBuilder {
        tokens: AdminTokenService::new(secret)?,
        credentials: Box::new(StaticCredentials::new(admin_id, secret_key)),
        store: Box::new(SqliteStore::open_in_memory()?),
        throttle: ThrottleConfig {
            global_per_sec: 1000,
            per_admin_per_min: 5,
        },
    }
    .build())
}
