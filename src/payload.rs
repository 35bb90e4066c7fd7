//! The QR payload record and its base64(JSON) token encoding.
//!
//! A token is a single printable string: the JSON serialization of
//! [`SignaturePayload`], base64-encoded. Decoding is total: malformed or
//! tampered tokens come back as `None`, never as an error.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fixed `type` tag carried by every payload.
pub const PAYLOAD_TYPE: &str = "digital_signature";

/// Payload format version written by [`encode_payload`].
pub const PAYLOAD_VERSION: &str = "1.0";

/// The record embedded in a QR code.
///
/// `type`, `message`, `signature`, and `public_key` are required on
/// decode; `version` is informational only and defaults when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub message: String,
    /// Base64-encoded signature text.
    pub signature: String,
    /// PEM-encoded public key of the signer.
    pub public_key: String,
}

fn default_version() -> String {
    PAYLOAD_VERSION.to_string()
}

/// Build the payload record and encode it as a token.
pub fn encode_payload(
    message: &str,
    signature: &str,
    public_key_pem: &str,
) -> Result<String, Error> {
    let payload = SignaturePayload {
        payload_type: PAYLOAD_TYPE.to_string(),
        version: PAYLOAD_VERSION.to_string(),
        message: message.to_string(),
        signature: signature.to_string(),
        public_key: public_key_pem.to_string(),
    };
    let json = serde_json::to_string(&payload)?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Decode a token back into its payload record.
///
/// Returns `None` on invalid base64, non-UTF-8 bytes, invalid JSON, or a
/// missing required field. Tampered input is expected here, not a defect,
/// so no failure cause escapes as an error.
pub fn decode_payload(token: &str) -> Option<SignaturePayload> {
    let json_bytes = general_purpose::STANDARD.decode(token.trim()).ok()?;
    let json = String::from_utf8(json_bytes).ok()?;
    serde_json::from_str(&json).ok()
}
