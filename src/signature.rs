//! Message hashing, PKCS#1 v1.5 signing, and tolerant verification.

use base64::{engine::general_purpose, Engine as _};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// A message together with its signature and the signing public key.
///
/// The signature is valid over `message` iff it was produced by the
/// private counterpart of `public_key_pem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    pub message: String,
    /// Base64-encoded raw PKCS#1 v1.5 signature bytes.
    pub signature: String,
    pub public_key_pem: String,
}

/// SHA-256 digest over the UTF-8 encoding of `message`.
pub fn hash_message(message: &str) -> Vec<u8> {
    Sha256::digest(message.as_bytes()).to_vec()
}

/// Hex-encoded SHA-256 digest of `message`, for display.
///
/// Verification recomputes the digest independently; this value is never
/// fed back into it.
pub fn hash_hex(message: &str) -> String {
    hex::encode(hash_message(message))
}

/// Sign `message` with `private_key` and return the base64-encoded signature.
///
/// The message is hashed with SHA-256 and the digest signed using
/// PKCS#1 v1.5 padding.
///
/// # Errors
///
/// Returns [`Error::Signing`] if the key is rejected by the signing
/// primitive, e.g. a modulus too small for the padded digest.
pub fn sign_message(message: &str, private_key: &RsaPrivateKey) -> Result<String, Error> {
    let digest = hash_message(message);
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| Error::Signing(e.to_string()))?;
    Ok(general_purpose::STANDARD.encode(signature))
}

/// Verify a base64-encoded signature over `message` against `public_key`.
///
/// The signature text is sanitized before decoding: all whitespace is
/// stripped and `=` padding restored to a multiple of four characters, so
/// signatures that picked up newlines or lost padding in transit still
/// verify. Returns `false` for malformed base64, a wrong signature length,
/// or a cryptographic mismatch; callers only learn valid/invalid.
pub fn verify_message(message: &str, signature: &str, public_key: &RsaPublicKey) -> bool {
    let cleaned = sanitize_signature(signature);

    let signature_bytes = match general_purpose::STANDARD.decode(&cleaned) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let digest = hash_message(message);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature_bytes)
        .is_ok()
}

/// Strip whitespace and restore base64 padding.
fn sanitize_signature(signature: &str) -> String {
    let mut cleaned: String = signature.chars().filter(|c| !c.is_whitespace()).collect();
    let remainder = cleaned.len() % 4;
    if remainder != 0 {
        cleaned.extend(std::iter::repeat('=').take(4 - remainder));
    }
    cleaned
}
