//! HS256 token verification.
//! Used by: gate.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use subtle::ConstantTimeEq;

use super::{codec, AdminTokenService, ALGORITHM};
use crate::error::{Error, Result};
use crate::token::claims::Claims;

impl AdminTokenService {
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` against the logical time `now` (seconds since epoch).
    ///
    /// Checks run in a fixed order: structure, signature, algorithm, expiry.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims> {
        let (header_b64, payload_b64, signature_b64) = split_segments(token)?;

        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        let expected = self.sign(signing_input.as_bytes());
        let provided = codec::decode(signature_b64)?;
        if !signatures_match(&expected, &provided) {
            return Err(Error::InvalidSignature);
        }

        let header: Value = parse_segment(header_b64)?;
        match header.get("alg").and_then(Value::as_str) {
            Some(ALGORITHM) => {}
            Some(other) => return Err(Error::UnsupportedAlgorithm(other.to_owned())),
            None => return Err(Error::UnsupportedAlgorithm("missing".into())),
        }

        let payload: Map<String, Value> = parse_segment(payload_b64)?;
        if payload
            .get("exp")
            .and_then(Value::as_f64)
            .is_some_and(|exp| exp < now as f64)
        {
            return Err(Error::TokenExpired);
        }

        serde_json::from_value(Value::Object(payload)).map_err(|e| Error::Decode(e.to_string()))
    }
}

fn split_segments(token: &str) -> Result<(&str, &str, &str)> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(Error::MalformedToken),
    }
}

/// Length first, then a constant-time byte comparison.
fn signatures_match(expected: &[u8], provided: &[u8]) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    bool::from(expected.ct_eq(provided))
}

fn parse_segment<T: DeserializeOwned>(segment: &str) -> Result<T> {
    let bytes = codec::decode(segment)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
}
