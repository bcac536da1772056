// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Error type shared by every sealing operation. Variants carry enough context
//! to tell which key or field was rejected without ever echoing secret material.
//!
//! ## Error Variants
//!
//! - **InvalidKey**: malformed, off-curve or identity public key (raised before any RNG draw)
//! - **Encoding**: plaintext cannot be represented as the bytes the field requires
//! - **RngFailure**: the OS random source failed; fatal, never downgraded
//! - **KeyDerivationFailed**: ECDH or HKDF step failed
//! - **EncryptionFailed**: AES-GCM refused the input
//! - **InvalidPayload**: a ciphertext blob does not follow the wire layout
//! - **DecryptionFailed**: tag mismatch on the receiving side

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key could not be accepted as a secp256k1 point
    #[error("Invalid key ({key_type}): {reason}")]
    InvalidKey {
        /// Which key failed (e.g. "td_public_key", "ephemeral_public_key")
        key_type: String,
        reason: String,
    },

    /// Plaintext is not representable as required (e.g. non UTF-8 input)
    #[error("Encoding error in field '{field}': {reason}")]
    Encoding { field: String, reason: String },

    /// Secure randomness unavailable
    #[error("Secure random number generator failed: {reason}")]
    RngFailure { reason: String },

    #[error("Key derivation failed during {operation}: {reason}")]
    KeyDerivationFailed { operation: String, reason: String },

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Ciphertext blob validation failed
    #[error("Invalid payload field '{field}': {reason}")]
    InvalidPayload { field: String, reason: String },

    /// Authentication tag mismatch (wrong key or tampered blob)
    #[error("Decryption failed: {reason}")]
    DecryptionFailed { reason: String },
}

impl CryptoError {
    pub(crate) fn invalid_td_key(reason: impl Into<String>) -> Self {
        CryptoError::InvalidKey {
            key_type: "td_public_key".to_string(),
            reason: reason.into(),
        }
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidKey {
            key_type: "td_public_key".to_string(),
            reason: format!("hex decode error: {}", err),
        }
    }
}

impl From<rand::Error> for CryptoError {
    fn from(err: rand::Error) -> Self {
        CryptoError::RngFailure {
            reason: err.to_string(),
        }
    }
}
