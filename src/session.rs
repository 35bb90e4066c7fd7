//! Caller-owned sender and receiver session state.
//!
//! The core functions are stateless; these structs hold the per-session
//! values (current key pair, current signed message, current rendered
//! image) so a hosting surface can thread one session per user. Nothing
//! here is global and nothing is shared between the two roles except the
//! token string.

use crate::error::{Error, ErrorCode};
use crate::keys::{
    export_private_key, export_public_key, generate_key_pair, RsaKeyPair, DEFAULT_KEY_BITS,
};
use crate::payload::{decode_payload, encode_payload, SignaturePayload};
use crate::qr::{image_to_png_bytes, render_qr};
use crate::signature::{sign_message, SignedMessage};
use crate::verification::{verify_payload, VerificationResult};

/// Sender-side state: NoKeys → KeysGenerated → Signed → PayloadEncoded.
///
/// Operations fail with [`Error::State`] when called out of order; the only
/// backward transition is starting over via [`generate_keys`](Self::generate_keys)
/// or [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct SenderSession {
    keys: Option<RsaKeyPair>,
    signed: Option<SignedMessage>,
    qr_png: Option<Vec<u8>>,
}

impl SenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh key pair, discarding any previously signed message
    /// and rendered image.
    pub fn generate_keys(&mut self, bits: usize) -> Result<(), Error> {
        let keys = generate_key_pair(bits)?;
        self.keys = Some(keys);
        self.signed = None;
        self.qr_png = None;
        Ok(())
    }

    /// Generate a fresh key pair of [`DEFAULT_KEY_BITS`].
    pub fn generate_default_keys(&mut self) -> Result<(), Error> {
        self.generate_keys(DEFAULT_KEY_BITS)
    }

    pub fn keys(&self) -> Option<&RsaKeyPair> {
        self.keys.as_ref()
    }

    pub fn public_key_pem(&self) -> Result<String, Error> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| Error::State("no key pair has been generated".to_string()))?;
        export_public_key(keys.public_key())
    }

    /// Export the private key. The only path by which private key material
    /// leaves the session.
    pub fn private_key_pem(&self) -> Result<String, Error> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| Error::State("no key pair has been generated".to_string()))?;
        export_private_key(keys.private_key())
    }

    /// Sign `message` with the session key pair, replacing any previously
    /// signed message.
    pub fn sign(&mut self, message: &str) -> Result<&SignedMessage, Error> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| Error::State("cannot sign before generating a key pair".to_string()))?;

        let signature = sign_message(message, keys.private_key())?;
        let public_key_pem = export_public_key(keys.public_key())?;

        self.qr_png = None;
        Ok(self.signed.insert(SignedMessage {
            message: message.to_string(),
            signature,
            public_key_pem,
        }))
    }

    pub fn signed(&self) -> Option<&SignedMessage> {
        self.signed.as_ref()
    }

    /// Encode the signed message as a QR payload token.
    pub fn encode_token(&self) -> Result<String, Error> {
        let signed = self
            .signed
            .as_ref()
            .ok_or_else(|| Error::State("cannot encode before signing a message".to_string()))?;
        encode_payload(&signed.message, &signed.signature, &signed.public_key_pem)
    }

    /// Encode the signed message, render it as a QR code, and keep the PNG
    /// bytes in the session.
    pub fn render_qr(&mut self) -> Result<&[u8], Error> {
        let token = self.encode_token()?;
        let image = render_qr(&token)?;
        let bytes = image_to_png_bytes(&image)?;
        Ok(self.qr_png.insert(bytes).as_slice())
    }

    pub fn qr_png(&self) -> Option<&[u8]> {
        self.qr_png.as_deref()
    }

    /// Drop all session state, returning to NoKeys.
    pub fn reset(&mut self) {
        self.keys = None;
        self.signed = None;
        self.qr_png = None;
    }
}

/// Receiver-side state: NoPayload → PayloadDecoded → Verified.
#[derive(Debug, Default)]
pub struct ReceiverSession {
    payload: Option<SignaturePayload>,
    result: Option<VerificationResult>,
}

impl ReceiverSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a token into the session. Returns `None` and leaves the
    /// session without a payload when the token is malformed.
    pub fn decode(&mut self, token: &str) -> Option<&SignaturePayload> {
        self.result = None;
        self.payload = decode_payload(token);
        self.payload.as_ref()
    }

    /// Install an already-assembled payload, e.g. from manually entered
    /// message, signature, and key fields.
    pub fn set_payload(&mut self, payload: SignaturePayload) {
        self.result = None;
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&SignaturePayload> {
        self.payload.as_ref()
    }

    /// Verify the decoded payload and keep the result in the session.
    ///
    /// Without a decoded payload this reports a malformed-payload result
    /// rather than an error; a missing payload is the same user-visible
    /// state as an unparseable one.
    pub fn verify(&mut self) -> &VerificationResult {
        let result = match &self.payload {
            Some(payload) => verify_payload(payload),
            None => VerificationResult::failure(
                ErrorCode::PayloadMalformed,
                "No payload has been decoded",
            ),
        };
        self.result.insert(result)
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    /// Drop all session state, returning to NoPayload.
    pub fn reset(&mut self) {
        self.payload = None;
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::MIN_KEY_BITS;

    #[test]
    fn test_sender_requires_keys_before_signing() {
        let mut sender = SenderSession::new();
        assert!(matches!(sender.sign("hello"), Err(Error::State(_))));
        assert!(matches!(sender.public_key_pem(), Err(Error::State(_))));
    }

    #[test]
    fn test_sender_requires_signature_before_encoding() {
        let mut sender = SenderSession::new();
        sender.generate_keys(MIN_KEY_BITS).unwrap();
        assert!(matches!(sender.encode_token(), Err(Error::State(_))));
        assert!(matches!(sender.render_qr(), Err(Error::State(_))));
    }

    #[test]
    fn test_fresh_keys_discard_downstream_state() {
        let mut sender = SenderSession::new();
        sender.generate_keys(MIN_KEY_BITS).unwrap();
        sender.sign("first message").unwrap();
        sender.render_qr().unwrap();

        sender.generate_keys(MIN_KEY_BITS).unwrap();
        assert!(sender.signed().is_none());
        assert!(sender.qr_png().is_none());
        assert!(matches!(sender.encode_token(), Err(Error::State(_))));
    }

    #[test]
    fn test_receiver_verify_without_payload() {
        let mut receiver = ReceiverSession::new();
        let result = receiver.verify();
        assert!(!result.valid);
        assert_eq!(result.error_code, Some(ErrorCode::PayloadMalformed));
    }

    #[test]
    fn test_receiver_decode_garbage() {
        let mut receiver = ReceiverSession::new();
        assert!(receiver.decode("not-base64!!!").is_none());
        assert!(receiver.payload().is_none());
    }

    #[test]
    fn test_reset() {
        let mut sender = SenderSession::new();
        sender.generate_keys(MIN_KEY_BITS).unwrap();
        sender.sign("message").unwrap();
        sender.reset();
        assert!(sender.keys().is_none());
        assert!(sender.signed().is_none());
    }

    // The full sender → token → receiver flow with a 2048-bit key pair.
    #[test]
    fn test_end_to_end_flow() {
        let mut sender = SenderSession::new();
        sender.generate_default_keys().unwrap();
        sender.sign("Hello, World!").unwrap();

        let token = sender.encode_token().unwrap();
        let png = sender.render_qr().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let mut receiver = ReceiverSession::new();
        let payload = receiver.decode(&token).unwrap();
        assert_eq!(payload.message, "Hello, World!");

        let result = receiver.verify();
        assert!(result.valid, "Expected valid, got: {:?}", result);
        assert_eq!(result.message.as_deref(), Some("Hello, World!"));

        // Tampering with the decoded signature must flip the verdict.
        let mut tampered = receiver.payload().unwrap().clone();
        let mut chars: Vec<char> = tampered.signature.chars().collect();
        let idx = chars.iter().rposition(|&c| c != '=').unwrap();
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        tampered.signature = chars.into_iter().collect();

        let mut tampered_receiver = ReceiverSession::new();
        tampered_receiver.set_payload(tampered);
        let result = tampered_receiver.verify();
        assert!(!result.valid);
        assert_eq!(result.error_code, Some(ErrorCode::SignatureInvalid));
    }
}
