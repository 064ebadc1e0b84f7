//! HTTP handler modules.
//! Used by: server.

pub mod admin;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod public;

use serde::Deserialize;

const DEFAULT_PAGE: usize = 100;
const MAX_PAGE: usize = 500;

#[derive(Debug, Deserialize)]
pub struct Page {
    pub limit: Option<usize>,
}

impl Page {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE)
    }
}
