use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::keys::import_public_key;
use crate::payload::{decode_payload, SignaturePayload};
use crate::signature::{hash_hex, verify_message};

/// Structured verification result.
///
/// A malformed payload, an unparseable public key, and a signature mismatch
/// are distinct user-visible states; `error_code` tells them apart. The
/// underlying signature check itself stays binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    /// The recovered message, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hex SHA-256 digest of the recovered message, for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VerificationResult {
    pub fn success(message: &str) -> Self {
        Self {
            valid: true,
            message: Some(message.to_string()),
            message_hash: Some(hash_hex(message)),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(code: ErrorCode, message: &str) -> Self {
        Self {
            valid: false,
            message: None,
            message_hash: None,
            error_code: Some(code),
            error_message: Some(message.to_string()),
        }
    }
}

/// Verify a decoded payload: parse its public key, then check the
/// signature against the message.
pub fn verify_payload(payload: &SignaturePayload) -> VerificationResult {
    let public_key = match import_public_key(&payload.public_key) {
        Ok(key) => key,
        Err(e) => {
            return VerificationResult::failure(
                ErrorCode::PublicKeyInvalid,
                &format!("Failed to parse payload public key: {}", e),
            )
        }
    };

    if !verify_message(&payload.message, &payload.signature, &public_key) {
        return VerificationResult::failure(
            ErrorCode::SignatureInvalid,
            "Signature does not match the message",
        );
    }

    VerificationResult::success(&payload.message)
}

/// Decode a token and verify the payload it carries.
///
/// Implements the receiver flow:
/// 1. Decode the base64(JSON) token
/// 2. Parse the embedded public key
/// 3. Recompute the message digest and check the signature
/// 4. Return a structured result
pub fn verify_token(token: &str) -> VerificationResult {
    let payload = match decode_payload(token) {
        Some(p) => p,
        None => {
            return VerificationResult::failure(
                ErrorCode::PayloadMalformed,
                "Could not parse payload",
            )
        }
    };

    verify_payload(&payload)
}
