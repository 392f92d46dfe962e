//! Webhook Request Signing
//!
//! Ed25519 signature verification for incoming interaction requests. The
//! platform signs the concatenation of the timestamp header and the raw
//! request body with the application's key pair; both the signature and the
//! timestamp arrive hex-encoded in transport headers.

pub mod error;

pub use error::SignatureKeyError;

/// Re-export vodozemac types that are commonly needed.
pub mod types {
    pub use vodozemac::Ed25519Keypair;
    pub use vodozemac::Ed25519PublicKey;
    pub use vodozemac::Ed25519Signature;
}

use vodozemac::{Ed25519PublicKey, Ed25519Signature};

/// Length of a raw ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a detached ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Parse an application's hex-encoded public key.
pub fn public_key_from_hex(key: &str) -> Result<Ed25519PublicKey, SignatureKeyError> {
    let bytes = hex::decode(key)?;
    let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| SignatureKeyError::InvalidLength(bytes.len()))?;
    Ok(Ed25519PublicKey::from_slice(&bytes)?)
}

/// Verify a detached signature over `timestamp + body`.
///
/// `timestamp` and `signature` are taken verbatim from the request headers;
/// `body` must be the exact raw payload as received, not a re-serialization.
/// Returns `false` for malformed hex or wrong-length input rather than
/// skipping verification.
#[must_use]
pub fn verify_interaction_signature(
    public_key: &Ed25519PublicKey,
    timestamp: &str,
    signature: &str,
    body: &str,
) -> bool {
    let Ok(raw) = hex::decode(signature) else {
        return false;
    };
    let Ok(signature) = Ed25519Signature::from_slice(&raw) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body.as_bytes());

    public_key.verify(&message, &signature).is_ok()
}
