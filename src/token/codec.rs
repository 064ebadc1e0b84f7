//! base64url (no padding) segment codec.
//! Used by: token::sign, token::verify.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::{Error, Result};

/// URL-safe alphabet, never emits padding, tolerates it on input.
const SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode(input: impl AsRef<[u8]>) -> String {
    SEGMENT.encode(input)
}

pub fn decode(segment: &str) -> Result<Vec<u8>> {
    SEGMENT
        .decode(segment)
        .map_err(|e| Error::Decode(e.to_string()))
}

pub fn decode_text(segment: &str) -> Result<String> {
    String::from_utf8(decode(segment)?).map_err(|e| Error::Decode(e.to_string()))
}
