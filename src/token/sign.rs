//! HS256 token issuance.
//! Used by: handlers::auth.

use super::{codec, AdminTokenService, HEADER_JSON};
use crate::error::{Error, Result};
use crate::token::claims::Claims;

impl AdminTokenService {
    /// Encodes and signs `claims`. Timestamps are the caller's responsibility.
    pub fn issue(&self, claims: &Claims) -> Result<String> {
        if claims.exp <= claims.iat {
            return Err(Error::Validation("token must expire after it is issued".into()));
        }
        if let Some(key) = claims.shadowed_claim() {
            return Err(Error::Validation(format!("extra claim `{}` is reserved", key)));
        }
        let header = codec::encode(HEADER_JSON);
        let payload = codec::encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{}.{}", header, payload);
        let signature = codec::encode(self.sign(signing_input.as_bytes()));
        Ok(format!("{}.{}", signing_input, signature))
    }
}
