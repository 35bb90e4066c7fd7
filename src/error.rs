use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    #[error("Key parse error: {0}")]
    KeyParse(String),

    #[error("PKCS8 error: {0}")]
    Pkcs8(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Payload exceeds QR capacity: {0}")]
    Capacity(String),

    #[error("QR encode error: {0}")]
    Qr(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Session state error: {0}")]
    State(String),
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(err: rsa::pkcs8::Error) -> Self {
        Error::Pkcs8(err.to_string())
    }
}

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::Pkcs8(err.to_string())
    }
}

/// Error codes for structured verification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "PAYLOAD_MALFORMED")]
    PayloadMalformed,
    #[serde(rename = "PUBLIC_KEY_INVALID")]
    PublicKeyInvalid,
    #[serde(rename = "SIGNATURE_INVALID")]
    SignatureInvalid,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::PayloadMalformed => "PAYLOAD_MALFORMED",
            ErrorCode::PublicKeyInvalid => "PUBLIC_KEY_INVALID",
            ErrorCode::SignatureInvalid => "SIGNATURE_INVALID",
        };
        write!(f, "{}", s)
    }
}
