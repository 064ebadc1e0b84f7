//! Process configuration, read once at start-up.
//! Used by: main, state.

use crate::error::{Error, Result};

pub const SECRET_VAR: &str = "ADMIN_JWT_SECRET";
pub const ADMIN_ID_VAR: &str = "ADMIN_ID";
pub const ADMIN_SECRET_KEY_VAR: &str = "ADMIN_SECRET_KEY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_PATH: &str = "bounty.db";

pub struct Config {
    pub token_secret: String,
    pub admin_id: String,
    pub admin_secret_key: String,
    pub bind_addr: String,
    pub database_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Configuration(format!("{} must be set", key)))
        };

        Ok(Self {
            token_secret: required(SECRET_VAR)?,
            admin_id: required(ADMIN_ID_VAR)?,
            admin_secret_key: required(ADMIN_SECRET_KEY_VAR)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("admin_id", &self.admin_id)
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .finish_non_exhaustive()
    }
}
