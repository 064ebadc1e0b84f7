//! Admin token claims.
//! Used by: token::sign, token::verify, gate, handlers::auth.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ADMIN_ROLE: &str = "admin";
pub const ADMIN_TOKEN_TTL_SECS: i64 = 3600;

/// Keys owned by the named fields; `extra` must not repeat them.
pub const RESERVED_CLAIMS: [&str; 4] = ["sub", "role", "iat", "exp"];

/// Token payload. Fields other than the four known ones are kept in `extra`
/// so they survive an issue/verify round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn admin(sub: impl Into<String>, iat: i64) -> Self {
        Self {
            sub: sub.into(),
            role: ADMIN_ROLE.to_owned(),
            iat,
            exp: iat + ADMIN_TOKEN_TTL_SECS,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// First `extra` key that would shadow a named claim in the payload.
    pub fn shadowed_claim(&self) -> Option<&str> {
        RESERVED_CLAIMS
            .into_iter()
            .find(|key| self.extra.contains_key(*key))
    }
}
