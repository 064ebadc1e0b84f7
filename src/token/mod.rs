//! Admin token issuance and verification (HS256 compact tokens).
//! Used by: gate, handlers::auth, state.

pub mod claims;
pub mod codec;
mod sign;
mod verify;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "HS256";

/// Serialized once, byte-identical for every token.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Signs and verifies admin tokens with one shared symmetric secret.
///
/// The secret is consumed at construction; only the keyed HMAC state is kept,
/// so it cannot leak through `Debug` or logging.
#[derive(Clone)]
pub struct AdminTokenService {
    mac: HmacSha256,
}

impl AdminTokenService {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::Configuration("admin token secret is empty".into()));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(Self { mac })
    }

    fn sign(&self, signing_input: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(signing_input);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for AdminTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenService").finish_non_exhaustive()
    }
}
