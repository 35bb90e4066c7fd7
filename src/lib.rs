//! # qrsign
//!
//! RSA digital signatures exchanged as scannable QR payloads.
//!
//! A sender generates an RSA key pair, signs a text message, and embeds the
//! message, signature, and public key into a compact QR-encodable token. A
//! receiver decodes that token and cryptographically verifies the signature
//! against the recovered message and key.
//!
//! ## Features
//!
//! - **RSA Key Generation**: 2048-bit by default, with PEM import/export
//! - **Digital Signatures**: SHA-256 digests signed with PKCS#1 v1.5 padding
//! - **Tolerant Verification**: signature text survives whitespace noise and
//!   lost base64 padding
//! - **QR Payload Codec**: base64(JSON) tokens rendered as high
//!   error-correction QR images, decoded back losslessly
//! - **Structured Results**: malformed payloads and invalid signatures are
//!   distinct, typed outcomes
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsign::keys::{generate_key_pair, export_public_key, DEFAULT_KEY_BITS};
//! use qrsign::payload::encode_payload;
//! use qrsign::signature::sign_message;
//! use qrsign::verification::verify_token;
//!
//! // Sender: generate keys, sign, encode.
//! let keys = generate_key_pair(DEFAULT_KEY_BITS).unwrap();
//! let signature = sign_message("Hello, World!", keys.private_key()).unwrap();
//! let public_key_pem = export_public_key(keys.public_key()).unwrap();
//! let token = encode_payload("Hello, World!", &signature, &public_key_pem).unwrap();
//!
//! // Receiver: decode and verify.
//! let result = verify_token(&token);
//! assert!(result.valid);
//! assert_eq!(result.message.as_deref(), Some("Hello, World!"));
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return a `Result` carrying [`error::Error`]. The two
//! adversarial boundaries never error: [`payload::decode_payload`] returns
//! `None` for malformed tokens, and [`signature::verify_message`] returns
//! `false` for anything that is not a valid signature, without saying why.

pub mod error;
pub mod keys;
pub mod payload;
pub mod qr;
pub mod session;
pub mod signature;
pub mod verification;
