//! Signature key errors.

use thiserror::Error;

/// Errors from parsing an application's configured public key.
#[derive(Debug, Error)]
pub enum SignatureKeyError {
    /// Key string was not valid hex.
    #[error("public key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Decoded key had the wrong length.
    #[error("public key must be 32 bytes, got {0}")]
    InvalidLength(usize),
    /// Key bytes did not form a valid ed25519 public key.
    #[error("invalid ed25519 public key: {0}")]
    Key(#[from] vodozemac::KeyError),
}
